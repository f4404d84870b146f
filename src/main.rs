#![allow(unused_imports)]
#![allow(dead_code)]

use log::debug;

use crate::error::Error;
use crate::store::{MongoStore, Outcome, StoreConfig};

mod cli;
mod error;
mod post;
mod store;
mod utils;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DEFAULT_DB_URL: &str = "mongodb://localhost:27017";
const DEFAULT_DB_NAME: &str = "web";
const DEFAULT_COLLECTION: &str = "posts";

fn main() -> Result<(), Error> {
  utils::setup()?;

  let outcome = cli::run(std::env::args().collect(), || {
    let config = StoreConfig::from_env();
    debug!("connecting to {} ({}/{})", config.url, config.database, config.collection);
    MongoStore::connect(&config)
  })?;

  match outcome {
    Some(Outcome::Inserted) => println!("Post added successfully"),
    Some(Outcome::Duplicate) => println!("A post with that title already exists"),
    None => {} // help text was printed, nothing touched the store
  }
  Ok(())
}
