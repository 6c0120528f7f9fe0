use std::collections::HashMap;

use serde::Serialize;

use crate::channel::ChannelOverview;
use crate::round_to;
use crate::video::VideoRecord;

/// Sort metric for top-video rankings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Views,
    Likes,
    Comments,
    EngagementRate,
}

impl std::str::FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "views" => Ok(Metric::Views),
            "likes" => Ok(Metric::Likes),
            "comments" => Ok(Metric::Comments),
            "engagement_rate" => Ok(Metric::EngagementRate),
            other => Err(format!(
                "metric must be one of: views, likes, comments, engagement_rate (got '{other}')"
            )),
        }
    }
}

/// Ranked entry of a top-videos listing
#[derive(Debug, Serialize, Clone)]
pub struct RankedVideo {
    pub rank: usize,
    pub video_id: String,
    pub title: String,
    pub published_at: String,
    pub duration_seconds: u64,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub engagement_rate_pct: f64,
}

/// Per-video row of a side-by-side comparison
#[derive(Debug, Serialize, Clone)]
pub struct ComparedVideo {
    pub video_id: String,
    pub title: String,
    pub published_at: String,
    pub duration_seconds: u64,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub engagement_rate_pct: f64,
}

/// Side-by-side video comparison with per-metric winners
#[derive(Debug, Serialize, Clone)]
pub struct VideoComparison {
    pub videos: Vec<ComparedVideo>,
    pub winner_by_views: String,
    pub winner_by_likes: String,
    pub winner_by_comments: String,
    pub winner_by_engagement_rate: String,
}

/// Side-by-side channel comparison with per-metric winners
#[derive(Debug, Serialize, Clone)]
pub struct ChannelComparison {
    pub channels: Vec<ChannelOverview>,
    pub winner_by_subscribers: String,
    pub winner_by_total_views: String,
    pub winner_by_video_count: String,
}

/// Per-video engagement row
#[derive(Debug, Serialize, Clone)]
pub struct VideoEngagement {
    pub video_id: String,
    pub title: String,
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub like_rate_pct: f64,
    pub comment_rate_pct: f64,
    pub engagement_rate_pct: f64,
}

/// The most engaging video of a channel scan
#[derive(Debug, Serialize, Clone)]
pub struct TopEngagingVideo {
    pub video_id: String,
    pub title: String,
    pub engagement_rate_pct: f64,
}

/// Channel-wide engagement statistics
#[derive(Debug, Serialize, Clone)]
pub struct EngagementStats {
    pub total_videos_analyzed: usize,
    pub avg_views: f64,
    pub avg_likes: f64,
    pub avg_comments: f64,
    pub avg_like_rate_pct: f64,
    pub avg_comment_rate_pct: f64,
    pub avg_engagement_rate_pct: f64,
    pub top_engaging_video: TopEngagingVideo,
    pub videos: Vec<VideoEngagement>,
}

/// One tag with its occurrence count and average views
#[derive(Debug, Serialize, Clone)]
pub struct TagStat {
    pub tag: String,
    pub count: usize,
    pub avg_views: f64,
}

/// Tag aggregation across a channel scan
#[derive(Debug, Serialize, Clone)]
pub struct TagAnalysis {
    pub total_videos_analyzed: usize,
    pub unique_tags: usize,
    pub top_tags_by_frequency: Vec<TagStat>,
    pub top_tags_by_avg_views: Vec<TagStat>,
}

/// Engagement rate percentage: (likes + comments) / views * 100.
///
/// Exactly 0 when views is 0; otherwise rounded to 4 decimal places.
pub fn engagement_rate(views: u64, likes: u64, comments: u64) -> f64 {
    if views == 0 {
        return 0.0;
    }
    round_to((likes + comments) as f64 / views as f64 * 100.0, 4)
}

/// First-encountered maximum; ties go to the earliest item.
fn winner_by<T, K, F>(items: &[T], mut key: F) -> Option<&T>
where
    K: PartialOrd,
    F: FnMut(&T) -> K,
{
    let mut best: Option<(&T, K)> = None;
    for item in items {
        let k = key(item);
        match &best {
            Some((_, best_k)) if k <= *best_k => {}
            _ => best = Some((item, k)),
        }
    }
    best.map(|(item, _)| item)
}

fn metric_value(video: &RankedVideo, metric: Metric) -> f64 {
    match metric {
        Metric::Views => video.views as f64,
        Metric::Likes => video.likes as f64,
        Metric::Comments => video.comments as f64,
        Metric::EngagementRate => video.engagement_rate_pct,
    }
}

/// Rank a channel's videos by the chosen metric.
///
/// Stable descending sort, truncated to `limit`, with dense 1-based ranks.
pub fn rank_top_videos(videos: &[VideoRecord], metric: Metric, limit: usize) -> Vec<RankedVideo> {
    let mut ranked: Vec<RankedVideo> = videos
        .iter()
        .map(|v| RankedVideo {
            rank: 0,
            video_id: v.video_id.clone(),
            title: v.title.clone(),
            published_at: v.published_at.clone(),
            duration_seconds: v.duration_seconds,
            views: v.views,
            likes: v.likes,
            comments: v.comments,
            engagement_rate_pct: engagement_rate(v.views, v.likes, v.comments),
        })
        .collect();

    ranked.sort_by(|a, b| {
        metric_value(b, metric)
            .partial_cmp(&metric_value(a, metric))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(limit);
    for (idx, video) in ranked.iter_mut().enumerate() {
        video.rank = idx + 1;
    }
    ranked
}

/// Build the side-by-side comparison for a batch of videos.
///
/// Winners on an empty batch are empty strings.
pub fn compare_videos(videos: &[VideoRecord]) -> VideoComparison {
    let compared: Vec<ComparedVideo> = videos
        .iter()
        .map(|v| ComparedVideo {
            video_id: v.video_id.clone(),
            title: v.title.clone(),
            published_at: v.published_at.clone(),
            duration_seconds: v.duration_seconds,
            views: v.views,
            likes: v.likes,
            comments: v.comments,
            engagement_rate_pct: engagement_rate(v.views, v.likes, v.comments),
        })
        .collect();

    let winner_id = |w: Option<&ComparedVideo>| w.map(|v| v.video_id.clone()).unwrap_or_default();

    VideoComparison {
        winner_by_views: winner_id(winner_by(&compared, |v| v.views as f64)),
        winner_by_likes: winner_id(winner_by(&compared, |v| v.likes as f64)),
        winner_by_comments: winner_id(winner_by(&compared, |v| v.comments as f64)),
        winner_by_engagement_rate: winner_id(winner_by(&compared, |v| v.engagement_rate_pct)),
        videos: compared,
    }
}

/// Build the side-by-side comparison for a batch of channel overviews.
pub fn compare_channels(channels: Vec<ChannelOverview>) -> ChannelComparison {
    let winner_id = |w: Option<&ChannelOverview>| w.map(|c| c.channel_id.clone()).unwrap_or_default();

    ChannelComparison {
        winner_by_subscribers: winner_id(winner_by(&channels, |c| c.subscriber_count)),
        winner_by_total_views: winner_id(winner_by(&channels, |c| c.total_views)),
        winner_by_video_count: winner_id(winner_by(&channels, |c| c.total_videos)),
        channels,
    }
}

/// Compute channel-wide engagement statistics.
///
/// Returns `None` for an empty scan; the caller decides how to surface that.
pub fn engagement_stats(videos: &[VideoRecord]) -> Option<EngagementStats> {
    if videos.is_empty() {
        return None;
    }

    let enriched: Vec<VideoEngagement> = videos
        .iter()
        .map(|v| {
            let like_rate = if v.views > 0 {
                round_to(v.likes as f64 / v.views as f64 * 100.0, 4)
            } else {
                0.0
            };
            let comment_rate = if v.views > 0 {
                round_to(v.comments as f64 / v.views as f64 * 100.0, 4)
            } else {
                0.0
            };
            VideoEngagement {
                video_id: v.video_id.clone(),
                title: v.title.clone(),
                views: v.views,
                likes: v.likes,
                comments: v.comments,
                like_rate_pct: like_rate,
                comment_rate_pct: comment_rate,
                engagement_rate_pct: engagement_rate(v.views, v.likes, v.comments),
            }
        })
        .collect();

    let n = enriched.len() as f64;
    let sum = |f: fn(&VideoEngagement) -> f64| enriched.iter().map(f).sum::<f64>();

    let top = winner_by(&enriched, |v| v.engagement_rate_pct)?;
    let top = TopEngagingVideo {
        video_id: top.video_id.clone(),
        title: top.title.clone(),
        engagement_rate_pct: top.engagement_rate_pct,
    };

    Some(EngagementStats {
        total_videos_analyzed: enriched.len(),
        avg_views: round_to(sum(|v| v.views as f64) / n, 0),
        avg_likes: round_to(sum(|v| v.likes as f64) / n, 0),
        avg_comments: round_to(sum(|v| v.comments as f64) / n, 0),
        avg_like_rate_pct: round_to(sum(|v| v.like_rate_pct) / n, 4),
        avg_comment_rate_pct: round_to(sum(|v| v.comment_rate_pct) / n, 4),
        avg_engagement_rate_pct: round_to(sum(|v| v.engagement_rate_pct) / n, 4),
        top_engaging_video: top,
        videos: enriched,
    })
}

/// Aggregate tags across a channel scan and correlate with view counts.
///
/// Tags are lower-cased and trimmed before grouping; empty tags are dropped.
/// Returns `None` for an empty scan; a scan with zero tags yields a
/// zero-filled result.
pub fn tag_analysis(videos: &[VideoRecord]) -> Option<TagAnalysis> {
    if videos.is_empty() {
        return None;
    }

    // First-encounter order kept so tie-breaks stay deterministic.
    let mut order: Vec<String> = Vec::new();
    let mut views_by_tag: HashMap<String, Vec<u64>> = HashMap::new();

    for video in videos {
        for tag in &video.tags {
            let tag = tag.trim().to_lowercase();
            if tag.is_empty() {
                continue;
            }
            views_by_tag
                .entry(tag.clone())
                .or_insert_with(|| {
                    order.push(tag.clone());
                    Vec::new()
                })
                .push(video.views);
        }
    }

    let stats: Vec<TagStat> = order
        .iter()
        .map(|tag| {
            let views = &views_by_tag[tag];
            TagStat {
                tag: tag.clone(),
                count: views.len(),
                avg_views: round_to(
                    views.iter().sum::<u64>() as f64 / views.len() as f64,
                    0,
                ),
            }
        })
        .collect();

    let top_by = |key: fn(&TagStat) -> f64| {
        let mut sorted = stats.clone();
        sorted.sort_by(|a, b| key(b).partial_cmp(&key(a)).unwrap_or(std::cmp::Ordering::Equal));
        sorted.truncate(20);
        sorted
    };

    Some(TagAnalysis {
        total_videos_analyzed: videos.len(),
        unique_tags: stats.len(),
        top_tags_by_frequency: top_by(|s| s.count as f64),
        top_tags_by_avg_views: top_by(|s| s.avg_views),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(id: &str, views: u64, likes: u64, comments: u64) -> VideoRecord {
        VideoRecord {
            video_id: id.to_string(),
            title: format!("Video {id}"),
            description: String::new(),
            tags: Vec::new(),
            published_at: "2024-01-01T00:00:00Z".to_string(),
            duration_seconds: 60,
            views,
            likes,
            comments,
            thumbnail_url: String::new(),
        }
    }

    fn tagged(id: &str, views: u64, tags: &[&str]) -> VideoRecord {
        let mut v = video(id, views, 0, 0);
        v.tags = tags.iter().map(|t| t.to_string()).collect();
        v
    }

    #[test]
    fn test_metric_from_str() {
        assert_eq!("views".parse::<Metric>().unwrap(), Metric::Views);
        assert_eq!(
            "engagement_rate".parse::<Metric>().unwrap(),
            Metric::EngagementRate
        );
        assert!("wins".parse::<Metric>().is_err());
    }

    #[test]
    fn test_engagement_rate_zero_views() {
        assert_eq!(engagement_rate(0, 100, 100), 0.0);
    }

    #[test]
    fn test_engagement_rate_formula() {
        // (10 + 0) / 100 * 100 = 10.0
        assert_eq!(engagement_rate(100, 10, 0), 10.0);
        // (5 + 2) / 3 * 100 = 233.3333...
        assert_eq!(engagement_rate(3, 5, 2), 233.3333);
    }

    #[test]
    fn test_rank_top_videos_by_views() {
        let videos = vec![
            video("small", 10, 0, 0),
            video("big", 100, 10, 0),
            video("mid", 50, 5, 0),
        ];

        let ranked = rank_top_videos(&videos, Metric::Views, 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[0].video_id, "big");
        assert_eq!(ranked[0].engagement_rate_pct, 10.0);
        assert_eq!(ranked[1].rank, 2);
        assert_eq!(ranked[1].video_id, "mid");
        assert_eq!(ranked[1].engagement_rate_pct, 10.0);
    }

    #[test]
    fn test_rank_top_videos_non_increasing_dense_ranks() {
        let videos = vec![
            video("a", 5, 0, 0),
            video("b", 9, 0, 0),
            video("c", 9, 0, 0),
            video("d", 1, 0, 0),
        ];

        let ranked = rank_top_videos(&videos, Metric::Views, 10);
        let ranks: Vec<usize> = ranked.iter().map(|v| v.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
        for pair in ranked.windows(2) {
            assert!(pair[0].views >= pair[1].views);
        }
        // Stable sort keeps tied items in scan order
        assert_eq!(ranked[0].video_id, "b");
        assert_eq!(ranked[1].video_id, "c");
    }

    #[test]
    fn test_rank_top_videos_by_engagement() {
        let videos = vec![video("a", 100, 1, 0), video("b", 100, 50, 0)];
        let ranked = rank_top_videos(&videos, Metric::EngagementRate, 10);
        assert_eq!(ranked[0].video_id, "b");
    }

    #[test]
    fn test_compare_videos_winners() {
        let videos = vec![
            video("v1", 100, 50, 1),
            video("v2", 200, 10, 9),
            video("v3", 10, 5, 5),
        ];

        let comparison = compare_videos(&videos);
        assert_eq!(comparison.winner_by_views, "v2");
        assert_eq!(comparison.winner_by_likes, "v1");
        assert_eq!(comparison.winner_by_comments, "v2");
        // v3: (5+5)/10*100 = 100% beats v1's 51% and v2's 9.5%
        assert_eq!(comparison.winner_by_engagement_rate, "v3");
        assert_eq!(comparison.videos.len(), 3);
    }

    #[test]
    fn test_compare_videos_tie_goes_to_first() {
        let videos = vec![video("first", 100, 0, 0), video("second", 100, 0, 0)];
        let comparison = compare_videos(&videos);
        assert_eq!(comparison.winner_by_views, "first");
    }

    #[test]
    fn test_compare_videos_empty_result_set() {
        let comparison = compare_videos(&[]);
        assert_eq!(comparison.winner_by_views, "");
        assert_eq!(comparison.winner_by_engagement_rate, "");
        assert!(comparison.videos.is_empty());
    }

    #[test]
    fn test_compare_channels_winners() {
        let overview = |id: &str, subs: u64, views: u64, videos: u64| ChannelOverview {
            channel_id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            subscriber_count: subs,
            total_views: views,
            total_videos: videos,
            created_at: String::new(),
            thumbnail_url: String::new(),
        };

        let comparison = compare_channels(vec![
            overview("UC1", 1000, 5000, 10),
            overview("UC2", 500, 9000, 50),
        ]);
        assert_eq!(comparison.winner_by_subscribers, "UC1");
        assert_eq!(comparison.winner_by_total_views, "UC2");
        assert_eq!(comparison.winner_by_video_count, "UC2");
    }

    #[test]
    fn test_engagement_stats_empty() {
        assert!(engagement_stats(&[]).is_none());
    }

    #[test]
    fn test_engagement_stats_averages() {
        let videos = vec![video("a", 100, 10, 0), video("b", 200, 20, 10)];
        let stats = engagement_stats(&videos).unwrap();

        assert_eq!(stats.total_videos_analyzed, 2);
        assert_eq!(stats.avg_views, 150.0);
        assert_eq!(stats.avg_likes, 15.0);
        assert_eq!(stats.avg_comments, 5.0);
        // a: 10%, b: 15% -> avg 12.5%
        assert_eq!(stats.avg_engagement_rate_pct, 12.5);
        assert_eq!(stats.top_engaging_video.video_id, "b");
        assert_eq!(stats.top_engaging_video.engagement_rate_pct, 15.0);
    }

    #[test]
    fn test_engagement_stats_zero_view_videos() {
        let videos = vec![video("a", 0, 10, 10)];
        let stats = engagement_stats(&videos).unwrap();
        assert_eq!(stats.videos[0].like_rate_pct, 0.0);
        assert_eq!(stats.videos[0].engagement_rate_pct, 0.0);
    }

    #[test]
    fn test_tag_analysis_empty_scan() {
        assert!(tag_analysis(&[]).is_none());
    }

    #[test]
    fn test_tag_analysis_no_tags_zero_filled() {
        let analysis = tag_analysis(&[video("a", 10, 0, 0)]).unwrap();
        assert_eq!(analysis.total_videos_analyzed, 1);
        assert_eq!(analysis.unique_tags, 0);
        assert!(analysis.top_tags_by_frequency.is_empty());
        assert!(analysis.top_tags_by_avg_views.is_empty());
    }

    #[test]
    fn test_tag_analysis_case_and_whitespace_merge() {
        let videos = vec![
            tagged("a", 100, &["Funny ", "other"]),
            tagged("b", 50, &["funny"]),
        ];

        let analysis = tag_analysis(&videos).unwrap();
        assert_eq!(analysis.unique_tags, 2);
        let funny = analysis
            .top_tags_by_frequency
            .iter()
            .find(|s| s.tag == "funny")
            .unwrap();
        assert_eq!(funny.count, 2);
        assert_eq!(funny.avg_views, 75.0);
    }

    #[test]
    fn test_tag_analysis_drops_empty_tags() {
        let analysis = tag_analysis(&[tagged("a", 10, &["  ", "real"])]).unwrap();
        assert_eq!(analysis.unique_tags, 1);
        assert_eq!(analysis.top_tags_by_frequency[0].tag, "real");
    }

    #[test]
    fn test_tag_analysis_top_20_cap() {
        let tags: Vec<String> = (0..25).map(|i| format!("tag{i}")).collect();
        let tag_refs: Vec<&str> = tags.iter().map(|s| s.as_str()).collect();
        let analysis = tag_analysis(&[tagged("a", 10, &tag_refs)]).unwrap();
        assert_eq!(analysis.unique_tags, 25);
        assert_eq!(analysis.top_tags_by_frequency.len(), 20);
        assert_eq!(analysis.top_tags_by_avg_views.len(), 20);
    }
}
