//! View-model mapper: pure row-to-view-model shaping.
//!
//! No side effects and no collaborator calls; missing embedded relations
//! resolve to fixed fallback values rather than absent fields.

use crate::domain::{Author, Category, Comment, Post};
use crate::rows::{CategoryRow, CommentRow, PostRow, ProfileRef};

pub const UNKNOWN_AUTHOR: &str = "Unknown Author";
pub const UNKNOWN_USER: &str = "Unknown User";
pub const UNCATEGORIZED: &str = "Uncategorized";
pub const PLACEHOLDER_AVATAR: &str = "https://via.placeholder.com/100";

fn author_view(profile: Option<ProfileRef>, fallback_name: &str) -> Author {
    let profile = profile.unwrap_or(ProfileRef {
        name: None,
        avatar_url: None,
    });
    Author {
        name: profile.name.unwrap_or_else(|| fallback_name.to_string()),
        avatar_url: profile
            .avatar_url
            .unwrap_or_else(|| PLACEHOLDER_AVATAR.to_string()),
    }
}

pub fn post_view(row: PostRow) -> Post {
    let category = row
        .categories
        .and_then(|c| c.name)
        .unwrap_or_else(|| UNCATEGORIZED.to_string());
    Post {
        id: row.id,
        title: row.title,
        content: row.content,
        excerpt: row.excerpt,
        author: author_view(row.profiles, UNKNOWN_AUTHOR),
        category,
        status: row.status,
        published_at: row.published_at,
        created_at: row.created_at,
        updated_at: row.updated_at,
        slug: row.slug,
        reading_time: row.reading_time,
    }
}

pub fn comment_view(row: CommentRow) -> Comment {
    Comment {
        id: row.id,
        post_id: row.post_id,
        author: author_view(row.profiles, UNKNOWN_USER),
        content: row.content,
        created_at: row.created_at,
    }
}

pub fn category_view(row: CategoryRow, post_count: u64) -> Category {
    Category {
        id: row.id,
        name: row.name,
        slug: row.slug,
        post_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PostStatus;
    use chrono::Utc;
    use uuid::Uuid;

    fn bare_post_row() -> PostRow {
        let now = Utc::now();
        PostRow {
            id: Uuid::new_v4(),
            title: "Title".into(),
            content: "Content".into(),
            excerpt: "Excerpt".into(),
            status: PostStatus::Draft,
            published_at: None,
            created_at: now,
            updated_at: now,
            slug: "title".into(),
            reading_time: 3,
            profiles: None,
            categories: None,
        }
    }

    #[test]
    fn missing_relations_fall_back() {
        let post = post_view(bare_post_row());
        assert_eq!(post.author.name, UNKNOWN_AUTHOR);
        assert_eq!(post.author.avatar_url, PLACEHOLDER_AVATAR);
        assert_eq!(post.category, UNCATEGORIZED);
    }

    #[test]
    fn null_fields_inside_profile_fall_back() {
        let mut row = bare_post_row();
        row.profiles = Some(ProfileRef {
            name: None,
            avatar_url: Some("https://cdn.example/a.png".into()),
        });
        let post = post_view(row);
        assert_eq!(post.author.name, UNKNOWN_AUTHOR);
        assert_eq!(post.author.avatar_url, "https://cdn.example/a.png");
    }

    #[test]
    fn comment_author_falls_back_to_unknown_user() {
        let comment = comment_view(CommentRow {
            id: Uuid::new_v4(),
            post_id: Uuid::new_v4(),
            content: "hi".into(),
            created_at: Utc::now(),
            profiles: None,
        });
        assert_eq!(comment.author.name, UNKNOWN_USER);
        assert_eq!(comment.author.avatar_url, PLACEHOLDER_AVATAR);
    }

    #[test]
    fn category_count_is_taken_from_the_fetch() {
        let category = category_view(
            CategoryRow {
                id: Uuid::new_v4(),
                name: "Engineering".into(),
                slug: "engineering".into(),
            },
            7,
        );
        assert_eq!(category.post_count, 7);
    }
}
