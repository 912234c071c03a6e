/// A request for content as the host's query engine sees it.
///
/// Pre-query hooks may rewrite the flags and pagination fields; the host reads
/// them back after the hooks run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDescriptor {
  /// Requested post type(s)
  pub post_types: Vec<String>,
  /// Requested slug
  pub name: Option<String>,
  /// Whether the host may cache the results
  pub cache_results: bool,
  /// Whether downstream result filters are skipped
  pub suppress_filters: bool,
  pub found_posts: u64,
  pub max_num_pages: u64,
}

impl Default for QueryDescriptor {
  fn default() -> Self {
    Self {
      post_types: Vec::new(),
      name: None,
      cache_results: true,
      suppress_filters: false,
      found_posts: 0,
      max_num_pages: 0,
    }
  }
}

impl QueryDescriptor {
  pub fn for_post_type(post_type: impl Into<String>) -> Self {
    Self {
      post_types: vec![post_type.into()],
      ..Self::default()
    }
  }

  pub fn for_post_types<I, S>(post_types: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      post_types: post_types.into_iter().map(Into::into).collect(),
      ..Self::default()
    }
  }

  pub fn with_name(mut self, slug: impl Into<String>) -> Self {
    self.name = Some(slug.into());
    self
  }

  /// True when exactly one post type is requested and it is `post_type`.
  pub fn targets_only(&self, post_type: &str) -> bool {
    matches!(self.post_types.as_slice(), [only] if only == post_type)
  }

  /// Requested slug, if present and non-empty.
  pub fn slug(&self) -> Option<&str> {
    self.name.as_deref().filter(|slug| !slug.is_empty())
  }
}
