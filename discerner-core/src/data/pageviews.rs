//! Wikimedia pageviews provider.
//!
//! Daily per-article views from the Wikimedia REST API, user agents only.
//! Timestamps arrive as wiki dates (`YYYYMMDDHH`) and go through the calendar
//! conversion like every other wiki date.

use super::provider::{DataError, ViewProvider};
use crate::calendar::parse_wiki_date;
use crate::domain::DailyViews;
use chrono::NaiveDate;
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;

const API_ROOT: &str = "https://wikimedia.org/api/rest_v1/metrics/pageviews/per-article";

#[derive(Debug, Deserialize)]
struct PageviewsResponse {
    items: Vec<PageviewItem>,
}

#[derive(Debug, Deserialize)]
struct PageviewItem {
    timestamp: String,
    views: u64,
}

pub struct WikimediaViews {
    client: reqwest::blocking::Client,
    project: String,
}

impl WikimediaViews {
    pub fn new() -> Result<Self, DataError> {
        Self::for_project("en.wikipedia")
    }

    pub fn for_project(project: &str) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("discerner/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DataError::Client(e.to_string()))?;
        Ok(Self {
            client,
            project: project.to_string(),
        })
    }

    fn views_url(&self, topic: &str, start: NaiveDate, end: NaiveDate) -> Result<Url, DataError> {
        let mut url = Url::parse(API_ROOT)
            .map_err(|e| DataError::Client(format!("bad pageviews root: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| DataError::Client("pageviews root cannot take segments".into()))?
            .extend([
                self.project.as_str(),
                "all-access",
                "user",
                topic,
                "daily",
                &format!("{}00", start.format("%Y%m%d")),
                &format!("{}00", end.format("%Y%m%d")),
            ]);
        Ok(url)
    }

    fn parse_response(topic: &str, body: &str) -> Result<Vec<DailyViews>, DataError> {
        let resp: PageviewsResponse = serde_json::from_str(body).map_err(|e| {
            DataError::ResponseFormatChanged(format!("failed to parse views for {topic}: {e}"))
        })?;

        let mut views = resp
            .items
            .into_iter()
            .map(|item| {
                let date = parse_wiki_date(&item.timestamp)
                    .map_err(|e| DataError::ResponseFormatChanged(e.to_string()))?;
                Ok(DailyViews {
                    date,
                    views: item.views as f64,
                })
            })
            .collect::<Result<Vec<_>, DataError>>()?;
        views.sort_by_key(|v| v.date);
        Ok(views)
    }
}

impl ViewProvider for WikimediaViews {
    fn name(&self) -> &str {
        "wikimedia_pageviews"
    }

    fn fetch_views(
        &self,
        topic: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyViews>, DataError> {
        let url = self.views_url(topic, start, end)?;
        tracing::debug!(topic, %url, "fetching page views");

        let resp = self.client.get(url).send().map_err(DataError::from_reqwest)?;
        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DataError::TopicNotFound {
                topic: topic.to_string(),
            });
        }
        if !status.is_success() {
            return Err(DataError::HttpStatus {
                provider: "wikimedia_pageviews",
                status: status.as_u16(),
                subject: topic.to_string(),
            });
        }

        let body = resp.text().map_err(DataError::from_reqwest)?;
        Self::parse_response(topic, &body)
    }
}
