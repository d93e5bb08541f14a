mod wiki_fetcher;

pub use wiki_fetcher::WikiFetcher;
