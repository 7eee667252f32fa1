use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "blog-client")]
#[command(about = "Command-line client for the article publishing API")]
pub struct CliConfig {
    #[arg(long, default_value = "http://localhost:3000/api")]
    pub base_url: String,

    #[arg(long, default_value = "30")]
    pub timeout_seconds: u64,

    #[arg(long, help = "Read base URL and timeout from a TOML file instead")]
    pub config_file: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create a new article
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        body: String,
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
    },
    /// List all articles
    List,
    /// Fetch a single article by slug
    Get { slug: String },
    /// List articles written by a user
    ByUser { user: String },
    /// Edit an article by slug; absent fields are left unchanged
    Edit {
        slug: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        body: Option<String>,
        #[arg(long, value_delimiter = ',')]
        tags: Option<Vec<String>>,
    },
    /// Delete an article by slug
    Delete { slug: String },
    /// List the featured articles
    Featured,
    /// List a user's followers
    Followers { username: String },
    /// List the users a user follows
    Following { username: String },
    /// Follow a user
    Follow {
        username: String,
        #[arg(long, help = "User whose follower/following lists are refreshed")]
        acting_user: String,
    },
    /// Unfollow a user
    Unfollow {
        username: String,
        #[arg(long, help = "User whose follower/following lists are refreshed")]
        acting_user: String,
    },
}

impl ConfigProvider for CliConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("base_url", &self.base_url)?;
        validation::validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        Ok(())
    }
}
