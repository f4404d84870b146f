use clap::{CommandFactory, Parser};
use log::debug;

use crate::error::Error;
use crate::post::Post;
use crate::store::{self, Outcome, PostStore};

const AFTER_HELP: &str = "Notes:
   If the -d flag (publish date) is left off, it will default to the current date.
   If the post title contains spaces, quotes are required.
   Multiple tags provided via the -s option must be separated by a space.
Examples:
   blog-updater -t \"New Post\" -s \"js programming\" -f postname.md
   blog-updater -t \"New Post\" -s python -f postname2.md -d 2020-11-19";

#[derive(Parser, Debug)]
#[clap(version = "1.0")]
#[command(name = "blog-updater")]
#[command(bin_name = "blog-updater")]
#[command(about = "a tool to add a blog post's metadata to the posts collection")]
#[command(after_help = AFTER_HELP)]
pub(crate) struct Cli {
  /// Title of the post. Quotes are required if it contains spaces.
  #[arg(short, long)]
  pub(crate) title: String,
  /// Space-separated list of tags.
  #[arg(short = 's', long)]
  pub(crate) tags:  String,
  /// Name of the markdown file holding the post content.
  #[arg(short, long)]
  pub(crate) file:  String,
  /// Publish date as YYYY-MM-DD. Defaults to the current date.
  #[arg(short, long)]
  pub(crate) date:  Option<String>,
}

/// Dispatch one invocation: print help when called bare, otherwise normalize
/// the flags into a [`Post`] and hand it to the store.
///
/// The store is built lazily so the help path never opens a connection.
pub(crate) fn run<S, F>(args: Vec<String>, make_store: F) -> Result<Option<Outcome>, Error>
where
  S: PostStore,
  F: FnOnce() -> Result<S, Error>,
{
  if args.len() <= 1 {
    let mut cmd = Cli::command();
    cmd.print_help()?;
    return Ok(None);
  }

  let cli = Cli::parse_from(&args);
  let post = Post::build(&cli.title, &cli.tags, &cli.file, cli.date.as_deref())?;
  debug!("normalized post: {post:?}");

  let store = make_store()?;
  store::publish(&store, &post).map(Some)
}
