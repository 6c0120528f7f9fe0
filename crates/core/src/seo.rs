use regex::Regex;
use serde::Serialize;

/// One scored SEO dimension
#[derive(Debug, Serialize, Clone)]
pub struct SeoCheck {
    pub score: u32,
    pub status: String,
    pub note: String,
}

/// The five heuristic dimensions, in a fixed order
#[derive(Debug, Serialize, Clone)]
pub struct SeoChecks {
    pub title_length: SeoCheck,
    pub description_length: SeoCheck,
    pub tag_count: SeoCheck,
    pub thumbnail: SeoCheck,
    pub description_quality: SeoCheck,
}

/// SEO report for a single video
#[derive(Debug, Serialize, Clone)]
pub struct SeoReport {
    pub video_id: String,
    pub title: String,
    pub overall_score: u32,
    pub checks: SeoChecks,
}

fn check(score: u32, status: &str, note: String) -> SeoCheck {
    SeoCheck {
        score,
        status: status.to_string(),
        note,
    }
}

fn title_length_check(title: &str) -> SeoCheck {
    let tlen = title.chars().count();
    match tlen {
        40..=70 => check(100, "great", format!("{tlen} chars (ideal: 40-70)")),
        20..=39 => check(70, "ok", format!("{tlen} chars (a bit short, ideal: 40-70)")),
        _ if tlen > 70 => check(60, "ok", format!("{tlen} chars (a bit long, ideal: 40-70)")),
        _ => check(30, "poor", format!("{tlen} chars (too short)")),
    }
}

fn description_length_check(description: &str) -> SeoCheck {
    let dlen = description.chars().count();
    match dlen {
        _ if dlen >= 500 => check(100, "great", format!("{dlen} chars")),
        200..=499 => check(80, "good", format!("{dlen} chars (ideal: 500+)")),
        50..=199 => check(50, "ok", format!("{dlen} chars (ideal: 200+)")),
        _ => check(10, "poor", format!("{dlen} chars (missing or very short)")),
    }
}

fn tag_count_check(tag_count: usize) -> SeoCheck {
    match tag_count {
        5..=15 => check(100, "great", format!("{tag_count} tags (ideal: 5-15)")),
        _ if tag_count > 15 => check(
            70,
            "ok",
            format!("{tag_count} tags (slightly over, ideal: 5-15)"),
        ),
        1..=4 => check(50, "ok", format!("{tag_count} tags (too few, ideal: 5-15)")),
        _ => check(0, "poor", "No tags found".to_string()),
    }
}

fn thumbnail_check(has_thumbnail: bool) -> SeoCheck {
    if has_thumbnail {
        check(100, "great", "Thumbnail present".to_string())
    } else {
        check(0, "poor", "No thumbnail found".to_string())
    }
}

fn description_quality_check(description: &str) -> SeoCheck {
    let has_links = description.to_lowercase().contains("http");
    let has_chapters = Regex::new(r"\d+:\d+").unwrap().is_match(description);

    let mut score = 60;
    let mut notes = Vec::new();
    if has_links {
        score += 20;
        notes.push("has links");
    }
    if has_chapters {
        score += 20;
        notes.push("has chapters/timestamps");
    }

    let status = if score >= 90 {
        "great"
    } else if score >= 70 {
        "good"
    } else {
        "ok"
    };
    let note = if notes.is_empty() {
        "no links or timestamps detected".to_string()
    } else {
        notes.join(", ")
    };
    check(score.min(100), status, note)
}

/// Score a video's metadata against YouTube SEO practices.
///
/// Each of the five dimensions is scored 0-100 with a qualitative band; the
/// overall score is the unweighted mean rounded to the nearest integer.
pub fn score_video(
    video_id: &str,
    title: &str,
    description: &str,
    tag_count: usize,
    has_thumbnail: bool,
) -> SeoReport {
    let checks = SeoChecks {
        title_length: title_length_check(title),
        description_length: description_length_check(description),
        tag_count: tag_count_check(tag_count),
        thumbnail: thumbnail_check(has_thumbnail),
        description_quality: description_quality_check(description),
    };

    let total = checks.title_length.score
        + checks.description_length.score
        + checks.tag_count.score
        + checks.thumbnail.score
        + checks.description_quality.score;
    let overall_score = (total as f64 / 5.0).round() as u32;

    SeoReport {
        video_id: video_id.to_string(),
        title: title.to_string(),
        overall_score,
        checks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_length_ideal() {
        let c = title_length_check(&"x".repeat(40));
        assert_eq!(c.score, 100);
        assert_eq!(c.status, "great");
        let c = title_length_check(&"x".repeat(70));
        assert_eq!(c.score, 100);
    }

    #[test]
    fn test_title_length_short_and_long() {
        assert_eq!(title_length_check(&"x".repeat(20)).score, 70);
        assert_eq!(title_length_check(&"x".repeat(71)).score, 60);
        assert_eq!(title_length_check("tiny").score, 30);
        assert_eq!(title_length_check("tiny").status, "poor");
    }

    #[test]
    fn test_description_length_bands() {
        assert_eq!(description_length_check(&"x".repeat(500)).score, 100);
        assert_eq!(description_length_check(&"x".repeat(200)).score, 80);
        assert_eq!(description_length_check(&"x".repeat(50)).score, 50);
        assert_eq!(description_length_check("").score, 10);
    }

    #[test]
    fn test_tag_count_bands() {
        assert_eq!(tag_count_check(5).score, 100);
        assert_eq!(tag_count_check(15).score, 100);
        assert_eq!(tag_count_check(16).score, 70);
        assert_eq!(tag_count_check(1).score, 50);
        let none = tag_count_check(0);
        assert_eq!(none.score, 0);
        assert_eq!(none.status, "poor");
    }

    #[test]
    fn test_description_quality_combinations() {
        let bare = description_quality_check("just words here");
        assert_eq!(bare.score, 60);
        assert_eq!(bare.status, "ok");
        assert_eq!(bare.note, "no links or timestamps detected");

        let links = description_quality_check("see https://example.com");
        assert_eq!(links.score, 80);
        assert_eq!(links.status, "good");

        let both = description_quality_check("Intro 0:00 https://example.com");
        assert_eq!(both.score, 100);
        assert_eq!(both.status, "great");
        assert_eq!(both.note, "has links, has chapters/timestamps");
    }

    #[test]
    fn test_overall_is_rounded_mean() {
        let report = score_video(
            "vid",
            &"x".repeat(50),   // 100
            &"y".repeat(600),  // 100, quality 60 (no links/timestamps)
            7,                 // 100
            true,              // 100
        );
        // (100 + 100 + 100 + 100 + 60) / 5 = 92
        assert_eq!(report.overall_score, 92);
    }

    #[test]
    fn test_missing_thumbnail_scores_zero() {
        let report = score_video("vid", "t", "", 0, false);
        assert_eq!(report.checks.thumbnail.score, 0);
        // (30 + 10 + 0 + 0 + 60) / 5 = 20
        assert_eq!(report.overall_score, 20);
    }
}
