use clap::Parser;
use color_eyre::{eyre::eyre, Result};
use remote_posts::cache::{MemoryStorage, NoopStorage, ObjectCache};
use remote_posts::{setup, Config, ContentItem, Host, HttpTransport, QueryDescriptor, POST_TYPE};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "remote-posts")]
#[command(about = "Resolve a post slug the way a host query would, backed by a remote API")]
#[command(version)]
struct Args {
  /// Slug to look up
  slug: String,

  /// Path to config file (default: ./remote-posts.yaml or $XDG_CONFIG_HOME/remote-posts/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Remote API root, overriding config and REMOTE_POSTS_BASE_URL
  #[arg(long)]
  base_url: Option<String>,

  /// Post type to query
  #[arg(long, default_value = POST_TYPE)]
  post_type: String,

  /// Write logs to this file instead of stderr
  #[arg(long)]
  log_file: Option<PathBuf>,

  /// Print the result as JSON
  #[arg(long)]
  json: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
  color_eyre::install()?;

  let args = Args::parse();
  let _log_guard = init_logging(args.log_file.as_deref())?;

  // Load configuration
  let config = Config::load(args.config.as_deref())?;

  // Override base URL if specified on command line
  let config = if let Some(base_url) = args.base_url.clone() {
    let config = config.with_base_url(base_url);
    config.validate()?;
    config
  } else {
    config
  };

  if config.cache.enabled {
    run(MemoryStorage::new(), &config, &args).await
  } else {
    run(NoopStorage, &config, &args).await
  }
}

async fn run<C: ObjectCache + 'static>(cache: C, config: &Config, args: &Args) -> Result<ExitCode> {
  let mut host = Host::new(cache);
  setup(&mut host, config, HttpTransport::new(config)?)?;

  let mut query = QueryDescriptor::for_post_type(args.post_type.as_str()).with_name(&args.slug);
  let Some(posts) = host.pre_query(&mut query).await else {
    eprintln!("No posts found");
    return Ok(ExitCode::FAILURE);
  };

  if args.json {
    let json = serde_json::to_string_pretty(&posts)
      .map_err(|e| eyre!("Failed to serialize posts: {}", e))?;
    println!("{}", json);
  } else {
    for post in &posts {
      print_post(post);
      // The synthesized id only exists in the object cache
      let resolvable = host.get_post(post.id)?.is_some();
      println!("Cached:   {}", if resolvable { "yes" } else { "no" });
      println!();
    }
    println!("Found: {} (pages: {})", query.found_posts, query.max_num_pages);
  }

  Ok(ExitCode::SUCCESS)
}

fn print_post(post: &ContentItem) {
  println!("ID:       {}", post.id);
  if let Some(remote_id) = post.remote_id() {
    println!("Remote:   {}", remote_id);
  }
  println!("Type:     {}", post.post_type);
  println!("Slug:     {}", post.slug);
  println!("Title:    {}", post.title);
  println!("Date:     {} (GMT {})", post.date, post.date_gmt);
  println!("Modified: {} (GMT {})", post.modified, post.modified_gmt);
  println!();
  println!("{}", post.excerpt.trim());
  println!();
  println!("{}", post.content.trim());
  println!();
}

/// Log to stderr, or to `log_file` through a non-blocking writer.
///
/// The returned guard flushes the file writer on drop and must outlive `main`'s work.
fn init_logging(log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
  let filter =
    EnvFilter::try_from_env("REMOTE_POSTS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

  let Some(path) = log_file else {
    tracing_subscriber::fmt()
      .with_env_filter(filter)
      .with_writer(std::io::stderr)
      .init();
    return Ok(None);
  };

  let file_name = path
    .file_name()
    .ok_or_else(|| eyre!("Invalid log file path: {}", path.display()))?;
  let dir = path
    .parent()
    .filter(|p| !p.as_os_str().is_empty())
    .unwrap_or_else(|| Path::new("."));

  let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(writer)
    .with_ansi(false)
    .init();

  Ok(Some(guard))
}
