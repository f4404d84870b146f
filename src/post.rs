use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::DATE_FORMAT;

/// A blog post's metadata, shaped exactly like the documents already in the
/// posts collection. The content file named by `post_file_name` is never
/// opened here; rendering it is the site generator's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Post {
  pub(crate) title:          String,
  pub(crate) url_title:      String,
  pub(crate) tags:           Vec<String>,
  pub(crate) post_file_name: String,
  pub(crate) publish_date:   String,
}

impl Post {
  /// Normalize raw flag values into the stored record, failing fast on blank
  /// required fields instead of letting empty strings reach the store.
  pub(crate) fn build(
    title: &str,
    tags: &str,
    file_name: &str,
    date_flag: Option<&str>,
  ) -> Result<Self, Error> {
    if title.trim().is_empty() {
      return Err(Error::MissingArgument("title"));
    }
    if file_name.trim().is_empty() {
      return Err(Error::MissingArgument("file name"));
    }
    Ok(Self {
      title: title.to_owned(),
      url_title: url_title(title),
      tags: tag_array(tags)?,
      post_file_name: file_name.to_owned(),
      publish_date: publish_date(date_flag)?,
    })
  }
}

/// Lowercase the title and turn the first space into a hyphen. Later spaces
/// are left alone; the slugs already published by the site rely on this.
pub(crate) fn url_title(title: &str) -> String {
  title.to_lowercase().replacen(' ', "-", 1)
}

/// Split the tag flag on single spaces into an ordered list.
pub(crate) fn tag_array(tags: &str) -> Result<Vec<String>, Error> {
  if tags.trim().is_empty() {
    return Err(Error::MissingArgument("tags"));
  }
  Ok(tags.split(' ').map(str::to_owned).collect())
}

/// Render the publish date as `{year}-{month}-{day}` with no zero padding.
///
/// Without a flag this is today's local calendar date. With a flag the value
/// is taken as a plain calendar date and its components are rendered as
/// given, so no local-timezone offset is applied a second time.
pub(crate) fn publish_date(date_flag: Option<&str>) -> Result<String, Error> {
  let (year, month, day) = match date_flag {
    None => {
      let today = Local::now().date_naive();
      (today.year(), today.month(), today.day())
    },
    Some(raw) => {
      let date = parse_date_flag(raw)?;
      (date.year(), date.month(), date.day())
    },
  };
  Ok(format!("{year}-{month}-{day}"))
}

fn parse_date_flag(raw: &str) -> Result<NaiveDate, Error> {
  // reject anything that isn't the documented YYYY-MM-DD shape up front
  let re = regex::Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
  if !re.is_match(raw) {
    return Err(Error::InvalidDate(raw.to_owned()));
  }
  NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| Error::InvalidDate(raw.to_owned()))
}
