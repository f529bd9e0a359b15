//! Tests for spotify module

#[cfg(test)]
mod tests {
    use super::super::*;
    use serde_json::json;

    #[test]
    fn test_trending_params_accept_camel_case_token() {
        let params: models::TrendingParams =
            serde_json::from_value(json!({"accessToken": "tok-1", "page": 2, "limit": 30}))
                .unwrap();

        assert_eq!(params.access_token.as_deref(), Some("tok-1"));
        assert_eq!(params.page, Some(2));
        assert_eq!(params.limit, Some(30));
    }

    #[test]
    fn test_trending_params_all_optional() {
        let params: models::TrendingParams = serde_json::from_value(json!({})).unwrap();
        assert!(params.access_token.is_none());
        assert!(params.page.is_none());
        assert!(params.limit.is_none());
    }

    #[test]
    fn test_search_params_missing_token() {
        let params: models::SearchParams =
            serde_json::from_value(json!({"query": "daft punk"})).unwrap();

        assert_eq!(params.query.as_deref(), Some("daft punk"));
        assert!(params.access_token.is_none());
        assert!(params.page.is_none());
    }
}
