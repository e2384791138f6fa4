//! Summary statistics over a snapshot of stored blogs.
//!
//! Every function here is pure: it reads an already-materialized slice of
//! [`BlogRecord`]s and returns a summary value, never touching the store.
//! Records missing a like count contribute 0, and a missing author is its own
//! grouping key. When several entries tie for the maximum, the one seen last
//! in input order wins; grouped reductions therefore walk groups in
//! first-appearance order, since that order decides the tie.

use crate::database::entities::BlogRecord;
use serde::Serialize;
use std::collections::HashMap;
use utoipa::ToSchema;

/// Projection of the most-liked blog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FavoriteBlog {
    pub title: String,
    pub author: Option<String>,
    pub likes: i64,
}

/// The author with the most blogs, and how many.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TopAuthorByBlogs {
    pub author: Option<String>,
    pub blogs: u64,
}

/// The author with the highest summed like count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TopAuthorByLikes {
    pub author: Option<String>,
    pub likes: i64,
}

fn likes_of(blog: &BlogRecord) -> i64 {
    blog.likes.unwrap_or(0)
}

/// Sum of likes across all blogs. Empty input sums to 0.
pub fn total_likes(blogs: &[BlogRecord]) -> i64 {
    blogs.iter().map(likes_of).sum()
}

/// The blog with the maximal like count, or `None` for an empty snapshot.
///
/// A candidate replaces the running best whenever its likes are greater than
/// *or equal*, so the last of several tied maxima is returned.
pub fn favorite_blog(blogs: &[BlogRecord]) -> Option<FavoriteBlog> {
    let mut best: Option<&BlogRecord> = None;
    for blog in blogs {
        let replace = match best {
            Some(current) => likes_of(blog) >= likes_of(current),
            None => true,
        };
        if replace {
            best = Some(blog);
        }
    }
    best.map(|blog| FavoriteBlog {
        title: blog.title.clone(),
        author: blog.author.clone(),
        likes: likes_of(blog),
    })
}

/// The author with the most blogs, or `None` for an empty snapshot.
pub fn most_blogs(blogs: &[BlogRecord]) -> Option<TopAuthorByBlogs> {
    let groups = group_by_author(blogs, |_| 1);
    max_group(groups).map(|(author, count)| TopAuthorByBlogs {
        author,
        blogs: count as u64,
    })
}

/// The author with the highest summed like count, or `None` for an empty
/// snapshot.
pub fn most_likes(blogs: &[BlogRecord]) -> Option<TopAuthorByLikes> {
    let groups = group_by_author(blogs, likes_of);
    max_group(groups).map(|(author, likes)| TopAuthorByLikes { author, likes })
}

/// Accumulate a per-author total, keeping groups in the order their author
/// first appears in the input. A plain map iteration would not do: the
/// enumeration order feeds the last-wins reduction below.
fn group_by_author<'a, F>(blogs: &'a [BlogRecord], weight: F) -> Vec<(Option<&'a str>, i64)>
where
    F: Fn(&BlogRecord) -> i64,
{
    let mut groups: Vec<(Option<&str>, i64)> = Vec::new();
    let mut positions: HashMap<Option<&str>, usize> = HashMap::new();
    for blog in blogs {
        let key = blog.author.as_deref();
        match positions.get(&key) {
            Some(&at) => groups[at].1 += weight(blog),
            None => {
                positions.insert(key, groups.len());
                groups.push((key, weight(blog)));
            }
        }
    }
    groups
}

/// Last-wins maximum over groups in first-seen order: ties go to the group
/// whose author appeared later in the input.
fn max_group(groups: Vec<(Option<&str>, i64)>) -> Option<(Option<String>, i64)> {
    let mut best: Option<(Option<&str>, i64)> = None;
    for (author, value) in groups {
        let replace = match best {
            Some((_, best_value)) => value >= best_value,
            None => true,
        };
        if replace {
            best = Some((author, value));
        }
    }
    best.map(|(author, value)| (author.map(str::to_owned), value))
}
