use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Error;

use super::create_client;

/// One caption track advertised by a watch page
#[derive(Debug, Deserialize, Clone)]
pub struct CaptionTrack {
    #[serde(rename = "baseUrl")]
    pub base_url: String,
    #[serde(rename = "languageCode")]
    pub language_code: Option<String>,
}

/// Timed-text payload in the `json3` format
#[derive(Debug, Deserialize)]
struct TimedText {
    #[serde(default)]
    events: Vec<TimedTextEvent>,
}

#[derive(Debug, Deserialize)]
struct TimedTextEvent {
    segs: Option<Vec<TimedTextSeg>>,
}

#[derive(Debug, Deserialize)]
struct TimedTextSeg {
    utf8: Option<String>,
}

/// A video's full transcript as plain text
#[derive(Debug, Serialize)]
pub struct TranscriptOutput {
    pub video_id: String,
    pub transcript_text: String,
    pub word_count: usize,
    pub segment_count: usize,
}

/// Pull the `captionTracks` array out of a watch page's embedded player config.
pub fn extract_caption_tracks(body: &str) -> Option<Vec<CaptionTrack>> {
    let re = Regex::new(r#""captionTracks":(\[.*?\])"#).unwrap();
    let caps = re.captures(body)?;
    serde_json::from_str(&caps[1]).ok()
}

/// Prefer an English track; otherwise take whatever is first.
fn pick_track(tracks: &[CaptionTrack]) -> Option<&CaptionTrack> {
    tracks
        .iter()
        .find(|t| {
            t.language_code
                .as_deref()
                .is_some_and(|code| code.starts_with("en"))
        })
        .or_else(|| tracks.first())
}

/// Join each event's parts into one segment text; empty events are dropped.
fn collect_segments(timed_text: TimedText) -> Vec<String> {
    timed_text
        .events
        .into_iter()
        .filter_map(|event| {
            let text: String = event
                .segs?
                .into_iter()
                .filter_map(|seg| seg.utf8)
                .collect::<Vec<_>>()
                .join("");
            let text = text.trim().to_string();
            (!text.is_empty()).then_some(text)
        })
        .collect()
}

/// Fetches a video's transcript by scraping its watch page caption tracks.
///
/// No API key is needed; caption data is served from the public watch page.
pub async fn transcript_data(video_id: &str) -> Result<TranscriptOutput, Error> {
    let client = create_client()?;

    let watch_url = format!("https://www.youtube.com/watch?v={video_id}");
    let body = client
        .get(&watch_url)
        .send()
        .await
        .map_err(|e| Error::Upstream(format!("Could not fetch transcript for {video_id}: {e}")))?
        .text()
        .await
        .map_err(|e| Error::Upstream(format!("Could not fetch transcript for {video_id}: {e}")))?;

    if body.contains("Sign in to confirm") {
        return Err(Error::Upstream(format!(
            "YouTube requires bot-verification for video {video_id}. \
             This affects some high-traffic videos. Try a different video."
        )));
    }

    let tracks = extract_caption_tracks(&body).ok_or_else(|| {
        Error::NotFound(format!("No captions available for video: {video_id}"))
    })?;
    let track = pick_track(&tracks).ok_or_else(|| {
        Error::NotFound(format!("No captions available for video: {video_id}"))
    })?;

    let timed_url = format!("{}&fmt=json3", track.base_url);
    let timed_text: TimedText = client
        .get(&timed_url)
        .send()
        .await
        .map_err(|e| Error::Upstream(format!("Could not fetch transcript for {video_id}: {e}")))?
        .json()
        .await
        .map_err(|e| Error::Upstream(format!("Could not fetch transcript for {video_id}: {e}")))?;

    let segments = collect_segments(timed_text);
    let transcript_text = segments.join(" ").trim().to_string();

    Ok(TranscriptOutput {
        video_id: video_id.to_string(),
        word_count: transcript_text.split_whitespace().count(),
        segment_count: segments.len(),
        transcript_text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_caption_tracks() {
        let body = r#"stuff before "captionTracks":[{"baseUrl":"https://www.youtube.com/api/timedtext?v=abc","languageCode":"en"},{"baseUrl":"https://www.youtube.com/api/timedtext?v=abc&lang=es","languageCode":"es"}],"other":1 trailing"#;
        let tracks = extract_caption_tracks(body).unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].language_code.as_deref(), Some("en"));
        assert!(tracks[0].base_url.contains("timedtext"));
    }

    #[test]
    fn test_extract_caption_tracks_absent() {
        assert!(extract_caption_tracks("<html>no captions here</html>").is_none());
    }

    #[test]
    fn test_pick_track_prefers_english() {
        let tracks = vec![
            CaptionTrack {
                base_url: "u1".to_string(),
                language_code: Some("es".to_string()),
            },
            CaptionTrack {
                base_url: "u2".to_string(),
                language_code: Some("en-US".to_string()),
            },
        ];
        assert_eq!(pick_track(&tracks).unwrap().base_url, "u2");
    }

    #[test]
    fn test_pick_track_falls_back_to_first() {
        let tracks = vec![
            CaptionTrack {
                base_url: "u1".to_string(),
                language_code: Some("fr".to_string()),
            },
            CaptionTrack {
                base_url: "u2".to_string(),
                language_code: Some("de".to_string()),
            },
        ];
        assert_eq!(pick_track(&tracks).unwrap().base_url, "u1");
    }

    #[test]
    fn test_collect_segments_joins_and_drops_empty() {
        let timed_text: TimedText = serde_json::from_value(serde_json::json!({
            "events": [
                {"tStartMs": 0, "dDurationMs": 1500, "segs": [{"utf8": "hello "}, {"utf8": "world"}]},
                {"tStartMs": 2000, "segs": [{"utf8": "\n"}]},
                {"tStartMs": 3000, "dDurationMs": 1000, "segs": [{"utf8": "again"}]}
            ]
        }))
        .unwrap();

        let segments = collect_segments(timed_text);
        assert_eq!(segments, vec!["hello world", "again"]);
    }
}
