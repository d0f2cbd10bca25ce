use clap::Parser;
use posts_core::config::{BACK_NAVIGATION_ENV, BASE_URL_ENV, DEFAULT_BASE_URL};

#[derive(Debug, Parser)]
#[command(name = "posts", version, about = "Browse posts from a jsonplaceholder-style API")]
pub struct Args {
    /// API root serving /posts and /posts/{id}
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Allow `b` to return from a post to the list
    #[arg(
        long = "back",
        env = BACK_NAVIGATION_ENV,
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub back_navigation: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
