use std::ffi::OsString;

pub use clap::Parser;

use crate::config::{DEFAULT_HOST, DEFAULT_PORT};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Host to send requests to
    /// Must carry an http:// or https:// scheme.
    #[clap(short = 'H', long, default_value = DEFAULT_HOST, help = "host with scheme")]
    host: String,

    /// Port to send requests to
    #[clap(
        short = 'P',
        long,
        default_value_t = DEFAULT_PORT,
        value_parser = clap::value_parser!(u16).range(1..),
        help = "port number"
    )]
    port: u16,

    /// User for basic authentication
    #[clap(short = 'u', long, help = "basic auth user")]
    user: Option<String>,

    /// Password for basic authentication
    #[clap(short = 'p', long, help = "basic auth password")]
    pass: Option<String>,

    /// Verbose mode
    /// Optional. Print response status and headers before the body.
    #[clap(
        short = 'v',
        long,
        help = "Print response status and headers",
        default_value = "false"
    )]
    verbose: bool,

    /// Lines per page in the interactive shell
    /// Optional. Defaults to the terminal height.
    #[clap(long, help = "lines per page in the interactive shell")]
    page_lines: Option<usize>,

    /// HTTP method of a one-shot request. Starts the shell when omitted.
    method: Option<String>,

    /// Path of a one-shot request
    path: Option<String>,

    /// Body of a one-shot request
    body: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    host: String,
    port: u16,
    user: Option<String>,
    pass: Option<String>,
    verbose: bool,
    page_lines: Option<usize>,
    method: Option<String>,
    path: Option<String>,
    body: Vec<String>,
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            host: args.host,
            port: args.port,
            user: args.user,
            pass: args.pass,
            verbose: args.verbose,
            page_lines: args.page_lines,
            method: args.method,
            path: args.path,
            body: args.body,
        }
    }
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        ClapArgs::parse().into()
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::parse_from(itr).into()
    }

    pub fn host(&self) -> &String {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn user(&self) -> Option<&String> {
        self.user.as_ref()
    }

    pub fn pass(&self) -> Option<&String> {
        self.pass.as_ref()
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn page_lines(&self) -> Option<usize> {
        self.page_lines
    }

    /// The one-shot request as a shell line, if a method was given
    pub fn request_line(&self) -> Option<String> {
        let method = self.method.as_ref()?;
        let mut parts = vec![method.clone()];
        parts.extend(self.path.iter().cloned());
        parts.extend(self.body.iter().cloned());
        Some(parts.join(" "))
    }
}
