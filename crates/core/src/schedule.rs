use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::Serialize;

use crate::round_to;
use crate::video::VideoRecord;

const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Upload count for one weekday
#[derive(Debug, Serialize, Clone)]
pub struct DayCount {
    pub day: String,
    pub count: u32,
}

/// Upload count for one UTC hour bucket ("00".."23")
#[derive(Debug, Serialize, Clone)]
pub struct HourCount {
    pub hour: String,
    pub count: u32,
}

/// Posting-schedule statistics for a channel scan
#[derive(Debug, Serialize, Clone)]
pub struct UploadSchedule {
    pub total_videos_analyzed: usize,
    pub avg_days_between_uploads: f64,
    pub consistency_score_pct: f64,
    pub posts_by_day: Vec<DayCount>,
    pub posts_by_hour: Vec<HourCount>,
    pub best_posting_day: String,
    pub best_posting_hour: String,
}

/// Analyze upload patterns across a channel scan.
///
/// Unparsable timestamps are skipped, never fatal. Fewer than two parseable
/// timestamps means both the average gap and the consistency score are 0.
/// Returns `None` for an empty scan.
pub fn analyze_schedule(videos: &[VideoRecord]) -> Option<UploadSchedule> {
    if videos.is_empty() {
        return None;
    }

    let mut by_day = [0u32; 7];
    let mut by_hour = [0u32; 24];
    let mut timestamps: Vec<DateTime<Utc>> = Vec::new();

    for video in videos {
        let Ok(dt) = DateTime::parse_from_rfc3339(&video.published_at) else {
            continue;
        };
        let dt = dt.to_utc();
        by_day[dt.weekday().num_days_from_monday() as usize] += 1;
        by_hour[dt.hour() as usize] += 1;
        timestamps.push(dt);
    }

    let mut avg_days = 0.0;
    let mut consistency = 0.0;

    if timestamps.len() > 1 {
        timestamps.sort();
        let gaps: Vec<i64> = timestamps
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).num_days())
            .collect();
        let mean = gaps.iter().sum::<i64>() as f64 / gaps.len() as f64;
        avg_days = round_to(mean, 1);

        // Sample stdev needs at least two gaps.
        if gaps.len() > 1 {
            let variance = gaps
                .iter()
                .map(|&g| {
                    let d = g as f64 - mean;
                    d * d
                })
                .sum::<f64>()
                / (gaps.len() - 1) as f64;
            let stdev = variance.sqrt();
            consistency = round_to((100.0 - (stdev / mean.max(1.0)) * 50.0).max(0.0), 1);
        }
    }

    let posts_by_day: Vec<DayCount> = DAY_NAMES
        .iter()
        .zip(by_day)
        .filter(|(_, count)| *count > 0)
        .map(|(day, count)| DayCount {
            day: day.to_string(),
            count,
        })
        .collect();

    let posts_by_hour: Vec<HourCount> = (0..24)
        .filter(|&h| by_hour[h] > 0)
        .map(|h| HourCount {
            hour: format!("{h:02}"),
            count: by_hour[h],
        })
        .collect();

    let best_day = best_bucket(&by_day)
        .map(|i| DAY_NAMES[i].to_string())
        .unwrap_or_default();
    let best_hour = best_bucket(&by_hour)
        .map(|h| format!("{h:02}:00 UTC"))
        .unwrap_or_default();

    Some(UploadSchedule {
        total_videos_analyzed: videos.len(),
        avg_days_between_uploads: avg_days,
        consistency_score_pct: consistency,
        posts_by_day,
        posts_by_hour,
        best_posting_day: best_day,
        best_posting_hour: best_hour,
    })
}

/// Index of the first strictly-largest non-zero bucket.
fn best_bucket(buckets: &[u32]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (idx, &count) in buckets.iter().enumerate() {
        if count > 0 && best.map(|b| count > buckets[b]).unwrap_or(true) {
            best = Some(idx);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video_at(published_at: &str) -> VideoRecord {
        VideoRecord {
            video_id: "v".to_string(),
            title: String::new(),
            description: String::new(),
            tags: Vec::new(),
            published_at: published_at.to_string(),
            duration_seconds: 0,
            views: 0,
            likes: 0,
            comments: 0,
            thumbnail_url: String::new(),
        }
    }

    #[test]
    fn test_analyze_schedule_empty() {
        assert!(analyze_schedule(&[]).is_none());
    }

    #[test]
    fn test_analyze_schedule_single_video() {
        // 2024-01-01 is a Monday
        let schedule = analyze_schedule(&[video_at("2024-01-01T09:30:00Z")]).unwrap();
        assert_eq!(schedule.total_videos_analyzed, 1);
        assert_eq!(schedule.avg_days_between_uploads, 0.0);
        assert_eq!(schedule.consistency_score_pct, 0.0);
        assert_eq!(schedule.posts_by_day.len(), 1);
        assert_eq!(schedule.posts_by_day[0].day, "Monday");
        assert_eq!(schedule.posts_by_hour[0].hour, "09");
        assert_eq!(schedule.best_posting_day, "Monday");
        assert_eq!(schedule.best_posting_hour, "09:00 UTC");
    }

    #[test]
    fn test_analyze_schedule_unparsable_skipped() {
        let schedule = analyze_schedule(&[
            video_at("not-a-date"),
            video_at(""),
            video_at("2024-01-01T09:00:00Z"),
        ])
        .unwrap();
        // Fewer than 2 parseable timestamps: both derived stats stay 0
        assert_eq!(schedule.total_videos_analyzed, 3);
        assert_eq!(schedule.avg_days_between_uploads, 0.0);
        assert_eq!(schedule.consistency_score_pct, 0.0);
        assert_eq!(schedule.posts_by_day.len(), 1);
    }

    #[test]
    fn test_analyze_schedule_all_unparsable() {
        let schedule = analyze_schedule(&[video_at("bogus")]).unwrap();
        assert!(schedule.posts_by_day.is_empty());
        assert!(schedule.posts_by_hour.is_empty());
        assert_eq!(schedule.best_posting_day, "");
        assert_eq!(schedule.best_posting_hour, "");
    }

    #[test]
    fn test_analyze_schedule_weekly_cadence() {
        let schedule = analyze_schedule(&[
            video_at("2024-01-01T12:00:00Z"),
            video_at("2024-01-08T12:00:00Z"),
            video_at("2024-01-15T12:00:00Z"),
            video_at("2024-01-22T12:00:00Z"),
        ])
        .unwrap();

        assert_eq!(schedule.avg_days_between_uploads, 7.0);
        // Perfectly regular uploads: stdev 0 -> score 100
        assert_eq!(schedule.consistency_score_pct, 100.0);
        assert_eq!(schedule.best_posting_day, "Monday");
        assert_eq!(schedule.posts_by_day[0].count, 4);
    }

    #[test]
    fn test_analyze_schedule_two_timestamps_no_stdev() {
        let schedule = analyze_schedule(&[
            video_at("2024-01-01T12:00:00Z"),
            video_at("2024-01-04T12:00:00Z"),
        ])
        .unwrap();
        // One gap: average is defined, consistency is not
        assert_eq!(schedule.avg_days_between_uploads, 3.0);
        assert_eq!(schedule.consistency_score_pct, 0.0);
    }

    #[test]
    fn test_analyze_schedule_day_order_monday_to_sunday() {
        let schedule = analyze_schedule(&[
            video_at("2024-01-07T10:00:00Z"), // Sunday
            video_at("2024-01-03T10:00:00Z"), // Wednesday
            video_at("2024-01-01T10:00:00Z"), // Monday
        ])
        .unwrap();

        let days: Vec<&str> = schedule.posts_by_day.iter().map(|d| d.day.as_str()).collect();
        assert_eq!(days, vec!["Monday", "Wednesday", "Sunday"]);
    }

    #[test]
    fn test_analyze_schedule_hour_buckets_sorted() {
        let schedule = analyze_schedule(&[
            video_at("2024-01-01T23:00:00Z"),
            video_at("2024-01-02T05:00:00Z"),
            video_at("2024-01-03T05:30:00Z"),
        ])
        .unwrap();

        let hours: Vec<&str> = schedule.posts_by_hour.iter().map(|h| h.hour.as_str()).collect();
        assert_eq!(hours, vec!["05", "23"]);
        assert_eq!(schedule.best_posting_hour, "05:00 UTC");
    }

    #[test]
    fn test_analyze_schedule_offset_timestamps_bucketed_in_utc() {
        // 02:00 at +03:00 is 23:00 UTC the previous day
        let schedule = analyze_schedule(&[video_at("2024-01-02T02:00:00+03:00")]).unwrap();
        assert_eq!(schedule.posts_by_hour[0].hour, "23");
        assert_eq!(schedule.posts_by_day[0].day, "Monday");
    }
}
