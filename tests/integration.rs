//! End-to-end tests over CSV fixtures

use approx::assert_relative_eq;
use news_sentiment::analysis::{align_dates, calculate_correlation, sentiment_trends, topic_trends};
use news_sentiment::data::{load_news, load_price_table};
use news_sentiment::indicators::{calculate_all, IndicatorParams};
use news_sentiment::sentiment::{init_lexicons, score_headlines, ScoringMethod, SentimentLabel};
use news_sentiment::topics::{TopicModel, TopicParams};
use std::io::Write;
use tempfile::NamedTempFile;

const NEWS: &str = "\
,headline,url,publisher,date,stock
0,Apple posts excellent quarter with great iPhone sales,https://example.com/1,Ann,2020-06-01 09:00:00-04:00,AAPL
1,Analysts see strong demand for Apple services,https://example.com/2,Bob,2020-06-01 15:00:00-04:00,AAPL
2,Apple faces terrible supply problems in China,https://example.com/3,Ann,2020-06-02 10:00:00-04:00,AAPL
3,Weak outlook weighs on Apple shares,https://example.com/4,Cid,2020-06-03 08:00:00-04:00,AAPL
4,Apple announces good buyback plan,https://example.com/5,Bob,2020-06-04 11:00:00-04:00,AAPL
5,Apple hosts developer conference,https://example.com/6,Cid,not a date,AAPL
6,Weekend headline without trading,https://example.com/7,Ann,2020-06-06 11:00:00-04:00,AAPL
";

const AAPL: &str = "\
Date,Open,High,Low,Close,Volume
2020-06-01,320.0,323.0,319.0,321.85,20000000
2020-06-02,321.0,325.0,320.0,323.34,21000000
2020-06-03,324.0,326.0,322.0,325.12,22000000
2020-06-04,324.5,325.5,320.0,322.32,23000000
2020-06-05,323.0,332.0,322.5,331.50,34000000
";

const MSFT: &str = "\
date,close
2020-06-01,182.83
2020-06-02,184.91
2020-06-03,185.36
2020-06-05,187.20
";

fn fixture(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_and_score_news() {
    let file = fixture(NEWS);
    let news = load_news(file.path());

    // the row with an unparseable date is gone
    assert_eq!(news.len(), 6);
    for record in &news {
        assert!(!record.cleaned_headline.chars().any(|c| c.is_ascii_punctuation()));
        assert_eq!(record.cleaned_headline, record.cleaned_headline.to_lowercase());
        assert_eq!(record.stock.as_deref(), Some("AAPL"));
    }

    let lexicons = init_lexicons();
    let compound = score_headlines(&news, ScoringMethod::Compound, &lexicons);
    assert!(compound
        .iter()
        .all(|s| (-1.0..=1.0).contains(&s.score) && s.label.is_some()));
    assert_eq!(compound[0].label, Some(SentimentLabel::Positive));

    let trends = sentiment_trends(&compound);
    let total: usize = trends.iter().map(|t| t.total()).sum();
    assert_eq!(total, news.len());
    assert!(trends.windows(2).all(|w| w[0].date < w[1].date));
}

#[test]
fn test_missing_news_file_is_empty() {
    assert!(load_news("/nonexistent/news.csv").is_empty());
}

#[test]
fn test_indicators_over_loaded_prices() {
    let file = fixture(AAPL);
    let table = load_price_table(file.path()).unwrap();
    assert_eq!(table.len(), 5);

    let params = IndicatorParams {
        sma_period: 3,
        ema_period: 3,
        rsi_period: 2,
        macd_fast: 2,
        macd_slow: 3,
        macd_signal: 2,
        bollinger_period: 3,
        ..Default::default()
    };
    let table = calculate_all(&table, "Close", &params).unwrap();

    let sma = table.column("SMA").unwrap();
    assert!(sma[1].is_nan());
    assert_relative_eq!(sma[2], (321.85 + 323.34 + 325.12) / 3.0, epsilon = 1e-9);

    let rsi = table.column("RSI").unwrap();
    assert!(rsi[..2].iter().all(|v| v.is_nan()));
    assert!(rsi[2..].iter().all(|v| (0.0..=100.0).contains(v)));

    let macd = table.column("MACD").unwrap();
    let signal = table.column("MACD_Signal").unwrap();
    assert_eq!(macd.iter().take_while(|v| v.is_nan()).count(), 3);
    assert_eq!(signal.iter().take_while(|v| v.is_nan()).count(), 3);

    assert!(calculate_all(&table, "close", &params).is_err());
}

#[test]
fn test_align_and_correlate() {
    let news_file = fixture(NEWS);
    let aapl_file = fixture(AAPL);
    let msft_file = fixture(MSFT);

    let news = load_news(news_file.path());
    let scored = score_headlines(&news, ScoringMethod::Polarity, &init_lexicons());

    let aapl = load_price_table(aapl_file.path())
        .unwrap()
        .to_series("AAPL", "Close")
        .unwrap();
    let msft = load_price_table(msft_file.path())
        .unwrap()
        .to_series("MSFT", "close")
        .unwrap();

    assert!(aapl.bars[0].daily_return.is_nan());
    assert_relative_eq!(
        aapl.bars[1].daily_return,
        (323.34 / 321.85 - 1.0) * 100.0,
        epsilon = 1e-9
    );

    let aligned = align_dates(&[aapl.clone(), msft.clone()], &scored).unwrap();
    let dates = aligned.dates();
    // 06-04 has no MSFT bar, 06-06 no bars at all
    assert_eq!(dates.len(), 3);
    assert!(dates.iter().all(|d| aapl.bars.iter().any(|b| b.date == *d)));
    assert!(dates.iter().all(|d| msft.bars.iter().any(|b| b.date == *d)));
    assert_eq!(aligned.report.news_dropped, 2);

    let result = calculate_correlation(&scored, &[aapl, msft]).unwrap();
    // 06-01 carries a NaN return
    assert_eq!(result.points, 2);
    assert!(result.coefficient.is_nan() || (-1.0..=1.0).contains(&result.coefficient));
}

#[test]
fn test_topics_over_loaded_news() {
    let file = fixture(NEWS);
    let news = load_news(file.path());

    let params = TopicParams {
        n_topics: 2,
        ..Default::default()
    };
    let model = TopicModel::fit(&news, &params).unwrap();
    assert_eq!(model.topics.len(), 2);
    assert!(model.topics.iter().all(|t| t.terms.len() <= 10));

    let again = TopicModel::fit(&news, &params).unwrap();
    assert_eq!(model.topics, again.topics);

    let trends = topic_trends(&news, &model.doc_topics).unwrap();
    for trend in &trends {
        assert_relative_eq!(trend.weights.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
    }
}
