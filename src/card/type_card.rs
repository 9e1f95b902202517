use super::{Card, CardError, CardRequest};
use crate::activity::{AggregationResult, Aggregator};
use crate::github::Fetcher;
use crate::render::{self, EmbeddedImage, ImageEncoder};
use crate::theme::{ResolvedTheme, ThemeOverride, ThemeResolver};
use url::Url;

/// Validated parameters of a commit time-of-day card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeProps {
    pub username: String,
    pub url: Option<Url>,
    pub overrides: ThemeOverride,
    pub preset: Option<String>,
}

/// Everything fetched for one [`TypeCard`] request.
#[derive(Debug, Clone)]
pub struct TypeCardData {
    pub result: AggregationResult,
    pub background: Option<EmbeddedImage>,
}

/// Card showing when during the day a user tends to commit.
#[derive(Debug)]
pub struct TypeCard<F, E> {
    aggregator: Aggregator<F>,
    encoder: E,
    resolver: ThemeResolver,
}

impl<F: Fetcher, E: ImageEncoder> TypeCard<F, E> {
    #[must_use]
    pub const fn new(aggregator: Aggregator<F>, encoder: E, resolver: ThemeResolver) -> Self {
        Self {
            aggregator,
            encoder,
            resolver,
        }
    }

    #[must_use]
    pub const fn resolver(&self) -> &ThemeResolver {
        &self.resolver
    }

    fn theme(&self, props: &TypeProps) -> ResolvedTheme {
        self.resolver.resolve(props.preset.as_deref(), &props.overrides)
    }

    async fn background(&self, url: Option<&Url>) -> Result<Option<EmbeddedImage>, CardError> {
        match url {
            Some(url) => self.encoder.encode(url).await.map(Some),
            None => Ok(None),
        }
    }
}

impl<F: Fetcher, E: ImageEncoder> Card for TypeCard<F, E> {
    type Props = TypeProps;
    type Data = TypeCardData;

    fn normalize(&self, request: &CardRequest) -> Result<TypeProps, CardError> {
        let overrides = ThemeOverride {
            title: request.color("title")?,
            icon: request.color("icon")?,
            text: request.color("text")?,
            background: request.color("background")?,
            border: request.color("border")?,
            font: request.value("font").map(str::to_string),
            size: request.positive("size")?,
            weight: request.weight("weight")?,
            title_size: request.positive("titlesize")?,
            title_weight: request.weight("titleweight")?,
            text_size: request.positive("textsize")?,
            text_weight: request.weight("textweight")?,
        };

        Ok(TypeProps {
            username: request.username()?,
            url: request.url("url")?,
            overrides,
            preset: request.value("tq").map(str::to_string),
        })
    }

    async fn fetch(&self, props: &TypeProps) -> Result<TypeCardData, CardError> {
        let (result, background) = tokio::join!(
            self.aggregator.aggregate(&props.username),
            self.background(props.url.as_ref())
        );

        Ok(TypeCardData {
            result: result?,
            background: background?,
        })
    }

    fn render(&self, data: &TypeCardData, props: &TypeProps) -> String {
        render::render(&self.theme(props), &data.result.buckets, data.result.label, data.background.as_ref())
    }

    fn to_json(&self, data: &TypeCardData, props: &TypeProps) -> serde_json::Value {
        serde_json::json!({
            "result": data.result,
            "theme": self.theme(props),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::{AggregatorOptions, CommitRecord};
    use crate::github::RepoRef;
    use crate::theme::Color;

    struct NoFetcher;

    impl Fetcher for NoFetcher {
        async fn user_id(&self, login: &str) -> Result<String, CardError> {
            Err(CardError::NotFound(login.to_string()))
        }

        async fn recent_repositories(&self, _login: &str, _limit: usize) -> Result<Vec<RepoRef>, CardError> {
            Ok(Vec::new())
        }

        async fn commit_timestamps(&self, _repo: &RepoRef, _author_id: &str, _limit: usize) -> Result<Vec<CommitRecord>, CardError> {
            Ok(Vec::new())
        }
    }

    struct NoEncoder;

    impl ImageEncoder for NoEncoder {
        async fn encode(&self, url: &Url) -> Result<EmbeddedImage, CardError> {
            Err(CardError::NotFound(url.to_string()))
        }
    }

    fn card() -> TypeCard<NoFetcher, NoEncoder> {
        TypeCard::new(Aggregator::new(NoFetcher, AggregatorOptions::default()), NoEncoder, ThemeResolver::new())
    }

    #[test]
    fn test_normalize_full_request() {
        let request = CardRequest::from_query(
            "username=octocat&url=https://example.com/a.png&text=ff0000&titlesize=20&textweight=700&tq=Dark&unknown=1",
        );
        let props = card().normalize(&request).unwrap();

        assert_eq!(props.username, "octocat");
        assert_eq!(props.url.unwrap().as_str(), "https://example.com/a.png");
        assert_eq!(props.overrides.text, Some(Color::from_hex(0xff0000)));
        assert_eq!(props.overrides.title_size, Some(20));
        assert_eq!(props.overrides.text_weight, Some(700));
        assert_eq!(props.overrides.border, None);
        assert_eq!(props.preset.as_deref(), Some("Dark"));
    }

    #[test]
    fn test_normalize_rejects_bad_values() {
        for query in [
            "",
            "username=",
            "username=octocat&text=nocolor",
            "username=octocat&size=big",
            "username=octocat&titleweight=5000",
            "username=octocat&url=file:///etc/passwd",
        ] {
            let err = card().normalize(&CardRequest::from_query(query)).unwrap_err();
            assert!(matches!(err, CardError::InvalidRequest(_)), "{query}");
        }
    }

    #[test]
    fn test_normalize_minimal_request() {
        let props = card().normalize(&CardRequest::from_query("username=octocat&tq=")).unwrap();
        assert!(props.overrides.is_empty());
        assert!(props.url.is_none());
        assert!(props.preset.is_none());
    }

    #[test]
    fn test_to_json_shape() {
        let card = card();
        let props = card.normalize(&CardRequest::from_query("username=octocat&tq=dark")).unwrap();
        let data = TypeCardData {
            result: AggregationResult::from_counts([1, 1, 1, 1]).unwrap(),
            background: None,
        };

        let value = card.to_json(&data, &props);
        assert_eq!(value["result"]["label"], "early");
        assert_eq!(value["result"]["total"], 4);
        assert!(value["theme"]["design"]["background"].is_string());
    }
}
