// SPDX-FileCopyrightText: 2026 Bazari Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Submitted-link classification.
//!
//! Gift detection runs first and wins; the channel rule only applies to
//! links that are not gifts. Classification is pure string matching on the
//! submitted text, no network lookups.

/// What kind of listing a submitted link advertises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// An NFT gift link (`t.me/nft/...`).
    Gift,
    /// A channel reference (`@name` or a plain `t.me/...` link).
    Channel,
}

const GIFT_PREFIXES: [&str; 3] = ["https://t.me/nft/", "http://t.me/nft/", "t.me/nft/"];

const CHANNEL_PREFIXES: [&str; 3] = ["https://t.me/", "http://t.me/", "t.me/"];

/// Classify a submitted link, or `None` if it is neither a gift nor a
/// channel reference.
///
/// Bot links (`_bot`, case-insensitive), invite links (`/joinchat/`), and
/// gift paths are excluded from the channel rule.
pub fn classify(link: &str) -> Option<LinkKind> {
    let link = link.trim();

    if GIFT_PREFIXES.iter().any(|p| link.starts_with(p)) {
        return Some(LinkKind::Gift);
    }

    if link.starts_with('@') {
        return Some(LinkKind::Channel);
    }

    if CHANNEL_PREFIXES.iter().any(|p| link.starts_with(p))
        && !link.contains("/nft/")
        && !link.to_lowercase().contains("_bot")
        && !link.contains("/joinchat/")
    {
        return Some(LinkKind::Channel);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gift_links_match_all_prefixes() {
        assert_eq!(classify("https://t.me/nft/DeskCalendar-12345"), Some(LinkKind::Gift));
        assert_eq!(classify("http://t.me/nft/DeskCalendar-12345"), Some(LinkKind::Gift));
        assert_eq!(classify("t.me/nft/DeskCalendar-12345"), Some(LinkKind::Gift));
    }

    #[test]
    fn gift_wins_over_channel() {
        // A gift prefix is also a channel prefix; gift must be checked first.
        assert_eq!(classify("https://t.me/nft/Gift-1"), Some(LinkKind::Gift));
    }

    #[test]
    fn channel_links_match() {
        assert_eq!(classify("@giftsmarket"), Some(LinkKind::Channel));
        assert_eq!(classify("https://t.me/somechannel"), Some(LinkKind::Channel));
        assert_eq!(classify("t.me/somechannel"), Some(LinkKind::Channel));
    }

    #[test]
    fn bot_and_invite_links_are_rejected() {
        assert_eq!(classify("https://t.me/some_bot"), None);
        assert_eq!(classify("https://t.me/SOME_BOT"), None);
        assert_eq!(classify("https://t.me/joinchat/AAAA"), None);
    }

    #[test]
    fn unrelated_text_is_rejected() {
        assert_eq!(classify("hello"), None);
        assert_eq!(classify("https://example.com/thing"), None);
        assert_eq!(classify(""), None);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(classify("  @giftsmarket  "), Some(LinkKind::Channel));
    }
}
