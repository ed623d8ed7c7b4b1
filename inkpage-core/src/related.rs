//! Related posts by shared tags.

use crate::models::Post;
use std::collections::HashSet;

/// Number of related posts shown on a post page.
pub const DEFAULT_RELATED_LIMIT: usize = 3;

/// Posts sharing at least one tag with `current`, most shared tags first.
///
/// `current` itself (matched by slug) is never included. Posts with the same
/// score keep their order in `all`.
pub fn related_posts<'a>(current: &Post, all: &'a [Post], limit: usize) -> Vec<&'a Post> {
    let current_tags: HashSet<&str> = current.tags.iter().map(String::as_str).collect();

    let mut scored: Vec<(usize, &Post)> = all
        .iter()
        .filter(|post| post.slug != current.slug)
        .filter_map(|post| {
            let shared = post
                .tags
                .iter()
                .map(String::as_str)
                .collect::<HashSet<_>>()
                .intersection(&current_tags)
                .count();
            (shared > 0).then_some((shared, post))
        })
        .collect();

    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().take(limit).map(|(_, post)| post).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PostMeta;

    fn post(slug: &str, tags: &[&str]) -> Post {
        Post::from_meta(
            slug,
            PostMeta {
                tags: tags.iter().map(|t| t.to_string()).collect(),
                ..PostMeta::default()
            },
            String::new(),
        )
    }

    fn slugs(posts: Vec<&Post>) -> Vec<&str> {
        posts.into_iter().map(|p| p.slug.as_str()).collect()
    }

    #[test]
    fn test_ranked_by_shared_tags() {
        let all = vec![
            post("current", &["rust", "web", "async"]),
            post("one", &["rust"]),
            post("none", &["cooking"]),
            post("three", &["rust", "web", "async"]),
            post("two", &["web", "async", "css"]),
        ];
        let related = related_posts(&all[0], &all, DEFAULT_RELATED_LIMIT);
        assert_eq!(slugs(related), vec!["three", "two", "one"]);
    }

    #[test]
    fn test_limit_and_ties_keep_order() {
        let all = vec![
            post("current", &["a"]),
            post("x", &["a"]),
            post("y", &["a"]),
            post("z", &["a"]),
        ];
        let related = related_posts(&all[0], &all, 2);
        assert_eq!(slugs(related), vec!["x", "y"]);
    }

    #[test]
    fn test_untagged_post_has_no_related() {
        let all = vec![post("current", &[]), post("x", &["a"])];
        assert!(related_posts(&all[0], &all, 3).is_empty());
    }

    #[test]
    fn test_duplicate_tags_count_once() {
        let current = post("current", &["a"]);
        let all = vec![post("x", &["a", "a"]), post("y", &["a"])];
        assert_eq!(slugs(related_posts(&current, &all, 3)), vec!["x", "y"]);
    }
}
