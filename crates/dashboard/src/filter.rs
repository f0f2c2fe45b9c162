//! Clip eligibility filtering.

use clipmore_core::types::{Clip, APPROVED};

/// A clip is displayable when either eligibility field approves it. The
/// top-level `status` and the nested moderation record come from two
/// different upstream producers; requiring both would hide clips that are
/// currently approved by only one of them.
pub fn clip_is_displayable(clip: &Clip) -> bool {
    clip.status == APPROVED
        || clip
            .moderation
            .as_ref()
            .is_some_and(|m| m.status == APPROVED)
}

/// Filter a clip list down to displayable clips, preserving order. The
/// input is left untouched.
pub fn displayable_clips(clips: &[Clip]) -> Vec<Clip> {
    clips
        .iter()
        .filter(|c| clip_is_displayable(c))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use clipmore_core::types::ClipModeration;

    fn clip(status: &str, moderation: Option<&str>) -> Clip {
        Clip {
            id: "clip-0".to_string(),
            url: "https://tiktok.com/@user/video/0".to_string(),
            thumbnail_url: "https://example.com/0.jpg".to_string(),
            views: 100,
            likes: 10,
            comments: 1,
            status: status.to_string(),
            created_at: Utc::now(),
            moderation: moderation.map(|s| ClipModeration {
                status: s.to_string(),
            }),
        }
    }

    #[test]
    fn test_eligibility_truth_table() {
        // Either field approving is sufficient.
        assert!(clip_is_displayable(&clip("APPROVED", Some("APPROVED"))));
        assert!(clip_is_displayable(&clip("APPROVED", Some("PENDING"))));
        assert!(clip_is_displayable(&clip("APPROVED", None)));
        assert!(clip_is_displayable(&clip("PENDING", Some("APPROVED"))));

        assert!(!clip_is_displayable(&clip("PENDING", Some("REJECTED"))));
        assert!(!clip_is_displayable(&clip("PENDING", None)));
        assert!(!clip_is_displayable(&clip("REJECTED", None)));
    }

    #[test]
    fn test_status_comparison_is_exact() {
        assert!(!clip_is_displayable(&clip("approved", None)));
        assert!(!clip_is_displayable(&clip("APPROVED ", None)));
    }

    #[test]
    fn test_filter_preserves_order_and_is_idempotent() {
        let clips = vec![
            clip("APPROVED", None),
            clip("PENDING", None),
            clip("PENDING", Some("APPROVED")),
        ];
        let first = displayable_clips(&clips);
        assert_eq!(first.len(), 2);
        assert_eq!(clips.len(), 3);

        let second = displayable_clips(&first);
        assert_eq!(second.len(), first.len());
    }
}
