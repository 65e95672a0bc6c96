// tests/test_multilingual.rs

use thread_splitter::segmentation::sentences::SentenceSegmenter;
use thread_splitter::{
    character_cost, exceeds_limit, split_at_natural_boundary, CharCounter, Platform, ThreadSplitter,
};
use unicode_segmentation::UnicodeSegmentation;

const MIXED_JAPANESE: &str = include_str!("fixtures/mixed_japanese.md");

#[test]
fn test_japanese_sentences() {
    let text = "これは文です。これは別の文です。";
    let sentences = SentenceSegmenter::split(text);
    assert_eq!(sentences, vec!["これは文です。", "これは別の文です。"]);
}

#[test]
fn test_mixed_script_sentences() {
    let text = "Rust is fast. 日本語も大丈夫です！Really?";
    let sentences = SentenceSegmenter::split(text);
    assert_eq!(sentences, vec!["Rust is fast.", "日本語も大丈夫です！", "Really?"]);
}

#[test]
fn test_cjk_counts_characters_not_bytes() {
    let x = Platform::X.profile();
    let text = "日".repeat(280);
    assert_eq!(text.len(), 840);
    assert_eq!(character_cost(&text, &x, &[]), 280);
    assert!(!exceeds_limit(&text, &x, &[]));
}

#[test]
fn test_japanese_breaks_at_full_stop() {
    let x = Platform::X.profile().with_max_chars(80);
    let sentence = "これはとても長い日本語の文章で、区切り位置を確認するためのものです。";
    let text = sentence.repeat(8);
    let pieces = split_at_natural_boundary(&text, &x, &[]);

    assert!(pieces.len() > 1);
    for piece in &pieces {
        assert!(!exceeds_limit(piece, &x, &[]));
        assert!(piece.ends_with('。'), "cut mid-sentence: {piece}");
    }
    assert_eq!(pieces.concat(), text);
}

#[test]
fn test_mixed_japanese_thread() {
    let x = Platform::X.profile();
    let thread = ThreadSplitter::builder()
        .platform(x)
        .optimize_length(false)
        .build()
        .split(MIXED_JAPANESE, &[], &[])
        .unwrap();

    assert!(thread.posts.len() > 1);
    for post in &thread.posts {
        assert!(!exceeds_limit(post, &x, &[]), "over limit: {post}");
    }

    let original: String = MIXED_JAPANESE.chars().filter(|c| !c.is_whitespace()).collect();
    let total = thread.posts.len();
    let rebuilt: String = thread
        .posts
        .iter()
        .enumerate()
        .map(|(i, p)| p.trim_start_matches(&format!("{}/{} ", i + 1, total)))
        .flat_map(|p| p.chars().filter(|c| !c.is_whitespace()))
        .collect();
    assert_eq!(rebuilt, original);
}

#[test]
fn test_emoji_sequences_stay_whole() {
    let mastodon = Platform::Mastodon.profile();
    let family = "👨‍👩‍👧‍👦";
    let text = format!("{} ", family.repeat(3)).repeat(200);
    let thread = ThreadSplitter::new(mastodon).split(&text, &[], &[]).unwrap();

    for post in &thread.posts {
        assert!(CharCounter::graphemes(post) <= 500);
        let body = post.split_once(' ').map_or(post.as_str(), |(_, rest)| rest);
        assert!(body.graphemes(true).all(|g| g == family || g == " "));
    }
}

#[test]
fn test_full_width_punctuation_breaks() {
    let threads = Platform::Threads.profile().with_max_chars(60);
    let text = "一二三四五六七八九十，".repeat(12);
    let pieces = split_at_natural_boundary(&text, &threads, &[]);

    assert!(pieces.len() > 1);
    for piece in &pieces {
        assert!(!exceeds_limit(piece, &threads, &[]));
        assert!(piece.ends_with('，'));
    }
}
