use std::path::PathBuf;

use clap::Parser;

use crate::auth::AuthGate;
use crate::errors::WikiError;

/// Startup configuration, from flags or the environment.
#[derive(Debug, Clone, Parser)]
#[command(name = "miniwiki", version, about = "Serve a directory of Markdown files as a wiki")]
pub struct Config {
    /// Listen host/port address of the web server.
    #[arg(long, env = "MINIWIKI_ADDR", default_value = ":8080")]
    pub addr: String,

    /// Name of this wiki.
    #[arg(long, env = "MINIWIKI_NAME", default_value = "wiki")]
    pub name: String,

    /// Password for editing pages. Editing is disabled when empty.
    #[arg(long, env = "MINIWIKI_PASS", default_value = "", hide_env_values = true)]
    pub pass: String,

    /// Directory of the pages' Markdown files.
    #[arg(long, env = "MINIWIKI_DIR", default_value = "./pages/")]
    pub dir: PathBuf,
}

impl Config {
    /// Address to bind. `:PORT` means every interface.
    pub fn listen_addr(&self) -> String {
        if self.addr.starts_with(':') {
            format!("0.0.0.0{}", self.addr)
        } else {
            self.addr.clone()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: ":8080".to_string(),
            name: "wiki".to_string(),
            pass: String::new(),
            dir: PathBuf::from("./pages/"),
        }
    }
}

/// Process-wide wiki settings, immutable once built.
#[derive(Debug)]
pub struct WikiConfig {
    pub name: String,
    pub auth: AuthGate,
    pub dir: PathBuf,
}

impl WikiConfig {
    /// Hash the configured password. Failure here must abort startup.
    pub fn from_config(config: &Config) -> Result<Self, WikiError> {
        Self::new(&config.name, &config.pass, config.dir.clone())
    }

    pub fn new(name: &str, pass: &str, dir: PathBuf) -> Result<Self, WikiError> {
        Ok(Self {
            name: name.to_string(),
            auth: AuthGate::new(pass)?,
            dir,
        })
    }

    pub fn editable(&self) -> bool {
        self.auth.is_editable()
    }
}
