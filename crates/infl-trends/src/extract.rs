//! Hashtag and keyword counting over trending video titles.

use std::collections::HashMap;
use std::sync::LazyLock;

use infl_youtube::Video;
use regex::Regex;
use serde::Serialize;

static HASHTAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#\w+").expect("valid hashtag regex"));
static NON_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid punctuation regex"));

/// Common English words never reported as keywords.
const STOP_WORDS: &[&str] = &[
    "the", "and", "a", "to", "of", "in", "is", "you", "that", "it", "he", "was", "for", "on",
    "are", "with", "as", "his", "they", "at", "be", "this", "have", "from", "or", "one", "had",
    "by", "word", "but", "not", "what", "all", "were", "we", "when", "your", "can", "said",
    "there", "use", "an", "each", "which", "she", "do", "how", "their", "if", "will", "up",
    "other", "about", "out", "many", "then", "them", "these", "so", "some", "her", "would",
    "make", "like", "him", "into", "time", "has", "look", "two", "more", "write", "go", "see",
    "number", "no", "way", "could", "people", "my", "than", "first", "water", "been", "call",
    "who", "oil", "its", "now", "find", "long", "down", "day", "did", "get", "come", "made",
    "may", "part", "over", "new", "sound", "take", "only", "little", "work", "know", "place",
    "year", "live", "me", "back", "give", "most", "very", "after", "thing", "our", "just",
    "name", "good", "sentence", "man", "think", "say", "great", "where", "help", "through",
    "much", "before", "line", "right", "too", "mean", "old", "any", "same", "tell", "boy",
    "follow", "came", "want", "show", "also", "around", "form", "three", "small", "set", "put",
    "end", "does", "another", "well", "large", "must", "big", "even", "such", "because", "turn",
    "here", "why", "ask", "went", "men", "read", "need", "land", "different", "home", "us",
    "move", "try", "kind", "hand", "picture", "again", "change", "off", "play", "spell", "air",
    "away", "animal", "house", "point", "page", "letter", "mother", "answer", "found", "study",
    "still", "learn", "should", "america", "world",
];

/// A trending video flattened for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingVideo {
    pub id: String,
    pub title: String,
    pub channel_title: String,
    pub published_at: String,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    pub tags: Vec<String>,
    pub category_id: String,
    pub thumbnail_url: String,
    pub url: String,
}

impl From<&Video> for TrendingVideo {
    fn from(video: &Video) -> Self {
        let stats = video.stats();
        let snippet = video.snippet.as_ref();
        Self {
            id: video.id.clone(),
            title: snippet.map(|s| s.title.clone()).unwrap_or_default(),
            channel_title: snippet.map(|s| s.channel_title.clone()).unwrap_or_default(),
            published_at: snippet.map(|s| s.published_at.clone()).unwrap_or_default(),
            view_count: stats.views,
            like_count: stats.likes,
            comment_count: stats.comments,
            tags: snippet.map(|s| s.tags.clone()).unwrap_or_default(),
            category_id: snippet.map(|s| s.category_id.clone()).unwrap_or_default(),
            thumbnail_url: snippet
                .and_then(|s| s.thumbnails.best_url())
                .unwrap_or_default(),
            url: format!("https://www.youtube.com/watch?v={}", video.id),
        }
    }
}

/// A term and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermCount {
    pub term: String,
    pub count: u64,
}

/// Counts terms, remembering the order each was first seen.
#[derive(Debug, Default)]
struct Counter {
    index: HashMap<String, usize>,
    counts: Vec<TermCount>,
}

impl Counter {
    fn add(&mut self, term: String) {
        if let Some(&i) = self.index.get(&term) {
            self.counts[i].count += 1;
        } else {
            self.index.insert(term.clone(), self.counts.len());
            self.counts.push(TermCount { term, count: 1 });
        }
    }

    /// Most frequent first; equal counts keep first-seen order.
    fn into_ranked(self) -> Vec<TermCount> {
        let mut counts = self.counts;
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts
    }
}

/// Hashtags from titles (`#word`) and from tags that start with `#`,
/// lowercased, most frequent first.
#[must_use]
pub fn extract_hashtags(videos: &[TrendingVideo]) -> Vec<TermCount> {
    let mut counter = Counter::default();
    for video in videos {
        for m in HASHTAG_RE.find_iter(&video.title) {
            counter.add(m.as_str().to_lowercase());
        }
        for tag in video.tags.iter().filter(|t| t.starts_with('#')) {
            counter.add(tag.to_lowercase());
        }
    }
    counter.into_ranked()
}

/// Title words seen at least `min_count` times, most frequent first.
///
/// Titles are lowercased and punctuation becomes whitespace. Stop words and
/// words of two characters or fewer are ignored.
#[must_use]
pub fn extract_keywords(videos: &[TrendingVideo], min_count: u64) -> Vec<TermCount> {
    let mut counter = Counter::default();
    for video in videos {
        let lowered = video.title.to_lowercase();
        let cleaned = NON_WORD_RE.replace_all(&lowered, " ");
        for word in cleaned.split_whitespace() {
            if word.chars().count() > 2 && !STOP_WORDS.contains(&word) {
                counter.add(word.to_string());
            }
        }
    }
    counter
        .into_ranked()
        .into_iter()
        .filter(|t| t.count >= min_count)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(title: &str, tags: &[&str]) -> TrendingVideo {
        TrendingVideo {
            id: "v".to_string(),
            title: title.to_string(),
            channel_title: String::new(),
            published_at: String::new(),
            view_count: 0,
            like_count: 0,
            comment_count: 0,
            tags: tags.iter().map(ToString::to_string).collect(),
            category_id: "24".to_string(),
            thumbnail_url: String::new(),
            url: String::new(),
        }
    }

    fn pairs(counts: &[TermCount]) -> Vec<(&str, u64)> {
        counts.iter().map(|t| (t.term.as_str(), t.count)).collect()
    }

    #[test]
    fn hashtags_from_titles_and_tags() {
        let videos = vec![
            video("Kuthu Song #Trending #Kollywood", &["#kollywood", "music"]),
            video("Trailer #trending", &["#NewRelease"]),
        ];
        let tags = extract_hashtags(&videos);
        assert_eq!(
            pairs(&tags),
            vec![("#trending", 2), ("#kollywood", 2), ("#newrelease", 1)]
        );
    }

    #[test]
    fn hashtags_include_native_script() {
        let tags = extract_hashtags(&[video("புதிய பாடல் #தமிழ்", &[])]);
        assert_eq!(tags.len(), 1);
        assert!(tags[0].term.starts_with("#த"));
    }

    #[test]
    fn keywords_drop_stop_words_short_words_and_rare_words() {
        let videos = vec![
            video("Vijay's new movie: Official Trailer!", &[]),
            video("Official trailer - the movie of the year", &[]),
            video("Cricket highlights", &[]),
        ];
        let keywords = extract_keywords(&videos, 2);
        assert_eq!(
            pairs(&keywords),
            vec![("movie", 2), ("official", 2), ("trailer", 2)]
        );
    }

    #[test]
    fn keywords_min_count_one_keeps_everything() {
        let keywords = extract_keywords(&[video("Cricket highlights", &[])], 1);
        assert_eq!(pairs(&keywords), vec![("cricket", 1), ("highlights", 1)]);
    }

    #[test]
    fn from_video_builds_watch_url() {
        let v: Video = serde_json::from_value(serde_json::json!({
            "id": "abc123",
            "snippet": { "title": "t", "channelTitle": "c", "categoryId": "10" },
            "statistics": { "viewCount": "5" }
        }))
        .unwrap();
        let t = TrendingVideo::from(&v);
        assert_eq!(t.url, "https://www.youtube.com/watch?v=abc123");
        assert_eq!(t.view_count, 5);
        assert_eq!(t.category_id, "10");
    }
}
