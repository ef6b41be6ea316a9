use admin_store::slug::derive_slug;
use admin_store::{NewPost, PostPatch, PostStore, RestPostStore, StoreError};
use admin_view::EditorConfig;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the hosted table API (falls back to ADMIN_STORE_URL)
    #[arg(short, long)]
    store_url: Option<String>,

    /// Table holding the posts
    #[arg(long, default_value = "posts")]
    table: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every post in the table
    List,

    /// Create a new post; the slug is derived from the title
    Create {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        author: String,

        #[arg(long)]
        cover_image: Option<String>,

        /// Rich-text markup; sanitized before it is stored
        #[arg(short, long, default_value = "")]
        content: String,
    },

    /// Update a post in place; omitted fields keep their current value,
    /// the slug is re-derived from the resulting title
    Update {
        #[arg(short, long)]
        id: i64,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        author: Option<String>,

        #[arg(long)]
        cover_image: Option<String>,

        #[arg(short, long)]
        content: Option<String>,
    },

    /// Delete a post by id
    Delete {
        #[arg(short, long)]
        id: i64,
    },
}

fn init_logging() {
    let fmt_layer = fmt::layer().with_target(true);

    let filter_layer = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,admin_store=debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();

    let base_url = cli
        .store_url
        .or_else(|| std::env::var("ADMIN_STORE_URL").ok())
        .context("Store URL not set. Pass --store-url or set ADMIN_STORE_URL")?;

    tracing::debug!("Using table '{}' at {}", cli.table, base_url);

    let mut store = RestPostStore::new(base_url, cli.table.clone());
    if let Ok(key) = std::env::var("ADMIN_STORE_API_KEY") {
        store = store.with_api_key(key);
    }

    match &cli.command {
        Commands::List => {
            println!("📋 Listing posts from table '{}'", cli.table);

            match store.select_all().await {
                Ok(posts) => {
                    println!("✅ Found {} posts", posts.len());
                    println!();

                    if posts.is_empty() {
                        println!("   No posts found");
                        println!("   Tip: Create your first post: cargo run -- create --title \"My Post\" --author \"Me\"");
                    } else {
                        for (i, post) in posts.iter().enumerate() {
                            println!("   {}. [{}] {}", i + 1, post.id, post.title);
                            println!("      Author: {}", post.author);
                            println!("      Slug: {}", post.slug);
                            if let Some(created) = &post.created_at {
                                println!("      Created: {}", created);
                            }
                            println!("      Content: {}", truncate(&post.content, 50));
                            println!();
                        }
                    }
                }
                Err(e) => {
                    fail("Failed to list posts", &e);
                }
            }
        }

        Commands::Create {
            title,
            author,
            cover_image,
            content,
        } => {
            println!("📝 Creating new post...");

            let new_post = NewPost {
                title: title.clone(),
                author: author.clone(),
                cover_image: cover_image.clone(),
                content: EditorConfig::default().clean_markup(content),
                slug: derive_slug(title),
            };

            match store.insert(new_post).await {
                Ok(post) => {
                    println!("✅ Post created successfully!");
                    print_post(&post);
                }
                Err(e) => {
                    fail("Failed to create post", &e);
                }
            }
        }

        Commands::Update {
            id,
            title,
            author,
            cover_image,
            content,
        } => {
            println!("✏️ Updating post #{}", id);

            // The table API has no get-by-id; overlay on the current row
            // from the full list.
            let posts = match store.select_all().await {
                Ok(posts) => posts,
                Err(e) => {
                    fail("Failed to load current posts", &e);
                }
            };
            let Some(current) = posts.into_iter().find(|p| p.id == *id) else {
                println!("❌ Post #{} not found", id);
                println!("   Tip: Use 'list' command to see available posts");
                std::process::exit(1);
            };

            let new_title = title.clone().unwrap_or(current.title);
            let new_content = content.clone().unwrap_or(current.content);
            let patch = PostPatch {
                slug: derive_slug(&new_title),
                title: new_title,
                author: author.clone().unwrap_or(current.author),
                cover_image: cover_image.clone().or(current.cover_image),
                content: EditorConfig::default().clean_markup(&new_content),
            };

            match store.update(*id, patch).await {
                Ok(post) => {
                    println!("✅ Post updated successfully!");
                    print_post(&post);
                }
                Err(e) => {
                    if e.is_not_found() {
                        println!("❌ Post #{} not found", id);
                        std::process::exit(1);
                    }
                    fail("Failed to update post", &e);
                }
            }
        }

        Commands::Delete { id } => {
            println!("🗑️ Deleting post #{}", id);

            match store.delete(*id).await {
                Ok(()) => {
                    println!("✅ Post deleted successfully!");
                }
                Err(e) => {
                    if e.is_not_found() {
                        println!("❌ Post #{} not found", id);
                        std::process::exit(1);
                    }
                    fail("Failed to delete post", &e);
                }
            }
        }
    }

    Ok(())
}

fn print_post(post: &admin_store::Post) {
    println!("   ID: {}", post.id);
    println!("   Title: {}", post.title);
    println!("   Author: {}", post.author);
    println!("   Slug: {}", post.slug);
    if let Some(cover) = &post.cover_image {
        println!("   Cover image: {}", cover);
    }
    if let Some(created) = &post.created_at {
        println!("   Created: {}", created);
    }
}

fn fail(message: &str, error: &StoreError) -> ! {
    if error.is_unauthorized() {
        println!("❌ Unauthorized. Check ADMIN_STORE_API_KEY");
    } else {
        println!("❌ {}: {}", message, error);
    }
    std::process::exit(1);
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 50), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("привет мир", 6), "привет...");
    }
}
