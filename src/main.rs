use anyhow::Result;
use blog_client::adapters::{ConsoleNotifier, TracingDispatch};
use blog_client::config::cli::{CliConfig, Command};
use blog_client::config::toml_config::TomlConfig;
use blog_client::core::{ArticleGateway, FollowGateway};
use blog_client::domain::model::{ArticleDraft, ArticleUpdate};
use blog_client::domain::ports::ConfigProvider;
use blog_client::utils::{logger, validation::Validate};
use clap::Parser;
use serde::Serialize;

#[tokio::main]
async fn main() -> Result<()> {
    let mut config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting blog-client");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Some(path) = config.config_file.clone() {
        match TomlConfig::from_file(&path) {
            Ok(file_config) => {
                config.base_url = file_config.base_url().to_string();
                config.timeout_seconds = file_config.timeout_seconds();
                tracing::info!("Loaded configuration from {}", path);
            }
            Err(e) => {
                tracing::error!("Could not load {}: {}", path, e);
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }
        }
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let articles = ArticleGateway::new(TracingDispatch, ConsoleNotifier, config.clone());
    let follows = FollowGateway::new(TracingDispatch, ConsoleNotifier, config.clone());

    if let Err(e) = run_command(&config.command, &articles, &follows).await {
        tracing::error!("Operation failed: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn run_command(
    command: &Command,
    articles: &ArticleGateway<TracingDispatch, ConsoleNotifier, CliConfig>,
    follows: &FollowGateway<TracingDispatch, ConsoleNotifier, CliConfig>,
) -> Result<()> {
    match command {
        Command::Create {
            title,
            description,
            body,
            tags,
        } => {
            let draft = ArticleDraft {
                title: title.clone(),
                description: description.clone(),
                body: body.clone(),
                tag_list: tags.clone(),
            };
            let article = articles.create_article(&draft).await?;
            print_json(&article)?;
        }
        Command::List => {
            let listing = articles.list_articles().await?;
            print_json(&listing.articles)?;
            if let Some(pagination) = &listing.pagination {
                tracing::info!("page {:?} of {}", pagination.current_page, pagination.page_count);
            }
        }
        Command::Get { slug } => {
            let article = articles.get_article(slug).await?;
            print_json(&article)?;
        }
        Command::ByUser { user } => {
            let listing = articles.list_user_articles(user).await?;
            print_json(&listing.articles)?;
        }
        Command::Edit {
            slug,
            title,
            description,
            body,
            tags,
        } => {
            let update = ArticleUpdate {
                title: title.clone(),
                description: description.clone(),
                body: body.clone(),
                tag_list: tags.clone(),
            };
            let article = articles.edit_article(slug, &update).await?;
            print_json(&article)?;
        }
        Command::Delete { slug } => {
            articles.delete_article(slug).await?;
        }
        Command::Featured => {
            let featured = articles.featured_articles().await?;
            print_json(&featured)?;
        }
        Command::Followers { username } => {
            let followers = follows.followers(username).await?;
            print_json(&followers)?;
        }
        Command::Following { username } => {
            let following = follows.following(username).await?;
            print_json(&following)?;
        }
        Command::Follow {
            username,
            acting_user,
        } => {
            follows.follow(username, acting_user).await?;
        }
        Command::Unfollow {
            username,
            acting_user,
        } => {
            follows.unfollow(username, acting_user).await?;
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
