use std::time::Duration;

use log::{debug, trace};
use mongodb::bson::doc;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::sync::{Client, Collection};
use mongodb::IndexModel;

use crate::error::Error;
use crate::post::Post;
use crate::{DEFAULT_COLLECTION, DEFAULT_DB_NAME, DEFAULT_DB_URL};

/// Bound on server selection so an unreachable store fails instead of
/// hanging the invocation.
const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Mongo duplicate-key write error code.
const DUPLICATE_KEY: i32 = 11000;

/// The two operations the publish flow needs from the posts collection.
pub(crate) trait PostStore {
  fn count_by_title(&self, title: &str) -> Result<u64, Error>;
  /// Insert the record. A store enforcing title uniqueness reports a clash
  /// as [`Error::DuplicateTitle`].
  fn insert(&self, post: &Post) -> Result<(), Error>;
}

/// Result of one publish attempt. A duplicate is a reported skip, not a
/// failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
  Inserted,
  Duplicate,
}

/// Insert the post unless a post with the same title is already stored.
///
/// The count runs first so the common duplicate case never attempts a write.
/// A concurrent writer can still land between the count and the insert; the
/// store's unique title index rejects that insert and it is reported as a
/// duplicate here rather than an error.
pub(crate) fn publish<S: PostStore>(store: &S, post: &Post) -> Result<Outcome, Error> {
  if store.count_by_title(&post.title)? > 0 {
    debug!("existing post titled {:?}", post.title);
    return Ok(Outcome::Duplicate);
  }
  match store.insert(post) {
    Ok(()) => Ok(Outcome::Inserted),
    Err(Error::DuplicateTitle) => Ok(Outcome::Duplicate),
    Err(e) => Err(e),
  }
}

/// Connection parameters for the posts collection, overridable through the
/// environment so tests and other deployments can point elsewhere.
#[derive(Debug, Clone)]
pub(crate) struct StoreConfig {
  pub(crate) url:        String,
  pub(crate) database:   String,
  pub(crate) collection: String,
}

impl StoreConfig {
  pub(crate) fn from_env() -> Self {
    let var = |key: &str, default: &str| std::env::var(key).unwrap_or_else(|_| default.to_owned());
    Self {
      url:        var("BLOG_DB_URL", DEFAULT_DB_URL),
      database:   var("BLOG_DB_NAME", DEFAULT_DB_NAME),
      collection: var("BLOG_DB_COLLECTION", DEFAULT_COLLECTION),
    }
  }
}

/// Handle on the posts collection. The collection keeps the client alive, so
/// dropping the store releases the connection on every exit path.
pub(crate) struct MongoStore {
  posts: Collection<Post>,
}

impl MongoStore {
  pub(crate) fn connect(config: &StoreConfig) -> Result<Self, Error> {
    let mut options = ClientOptions::parse(&config.url).map_err(Error::StorageUnavailable)?;
    options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);
    options.connect_timeout = Some(CONNECT_TIMEOUT);
    let client = Client::with_options(options).map_err(Error::StorageUnavailable)?;

    let posts = client.database(&config.database).collection::<Post>(&config.collection);
    let store = Self { posts };
    store.ensure_title_index()?;
    Ok(store)
  }

  /// Title uniqueness is enforced by the store itself, so two invocations
  /// racing past the existence check cannot both insert.
  fn ensure_title_index(&self) -> Result<(), Error> {
    let index = IndexModel::builder()
      .keys(doc! { "title": 1 })
      .options(IndexOptions::builder().unique(true).build())
      .build();
    self.posts.create_index(index, None).map_err(Error::StorageUnavailable)?;
    trace!("unique title index ensured");
    Ok(())
  }
}

impl PostStore for MongoStore {
  fn count_by_title(&self, title: &str) -> Result<u64, Error> {
    self
      .posts
      .count_documents(doc! { "title": title }, None)
      .map_err(Error::StorageUnavailable)
  }

  fn insert(&self, post: &Post) -> Result<(), Error> {
    match self.posts.insert_one(post, None) {
      Ok(_) => Ok(()),
      Err(e) if is_duplicate_key(&e) => Err(Error::DuplicateTitle),
      Err(e) => Err(Error::StorageWriteFailed(e)),
    }
  }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
  matches!(
    err.kind.as_ref(),
    ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY
  )
}
