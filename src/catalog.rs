/// One entry of the hand-maintained recommended-feeds table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendedFeed {
    pub name: &'static str,
    pub url: &'static str,
}

/// The recommended feeds, in display order.
///
/// Edit this table to add, remove, or rename entries. List position is
/// persisted as the row's sort order, and the URL is the upsert conflict
/// key, so URLs must stay unique.
pub const RECOMMENDED_FEEDS: &[RecommendedFeed] = &[
    RecommendedFeed { name: "AFP", url: "http://feeds.afpbb.com/rss/afpbb/afpbbnews" },
    RecommendedFeed { name: "BBC", url: "http://feeds.bbci.co.uk/japanese/rss.xml" },
    RecommendedFeed { name: "CNN", url: "http://feeds.cnn.co.jp/rss/cnn/cnn.rdf" },
    RecommendedFeed { name: "Rocket News 24", url: "http://feeds.rocketnews24.com/rocketnews24" },
    RecommendedFeed { name: "Weekly ASCII Plus", url: "http://weekly.ascii.jp/cate/1/rss.xml" },
    RecommendedFeed { name: "National Geographic", url: "http://nationalgeographic.jp/nng/rss/index.rdf" },
    RecommendedFeed { name: "Lifehacker", url: "http://www.lifehacker.jp/index.xml" },
    RecommendedFeed { name: "WIRED.jp", url: "http://wired.jp/rssfeeder/" },
    RecommendedFeed { name: "GIGAZINE", url: "https://gigazine.net/news/rss_2.0/" },
    RecommendedFeed { name: "Gizmodo", url: "http://feeds.gizmodo.jp/rss/gizmodo/index.xml" },
    RecommendedFeed { name: "CNET Japan", url: "http://feed.japan.cnet.com/rss/index.rdf" },
    RecommendedFeed { name: "AAPL Ch.", url: "http://applech2.com/index.rdf" },
    RecommendedFeed { name: "Kitamori Kawaraban", url: "https://northwood.blog.fc2.com/?xml" },
    RecommendedFeed { name: "EE Times Japan", url: "https://rss.itmedia.co.jp/rss/2.0/eetimes.xml" },
    RecommendedFeed { name: "PC Watch", url: "https://pc.watch.impress.co.jp/data/rss/1.0/pcw/feed.rdf" },
    RecommendedFeed { name: "ITmedia PC USER", url: "https://rss.itmedia.co.jp/rss/2.0/pcupdate.xml" },
    RecommendedFeed { name: "朝日新聞速報", url: "https://www.asahi.com/rss/asahi/newsheadlines.rdf" },
    RecommendedFeed { name: "The Verge", url: "https://www.theverge.com/rss/index.xml" },
];
