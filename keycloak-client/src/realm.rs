//! Provider endpoint URL construction.

use url::Url;

use crate::error::ClientError;

/// Canonical OpenID Connect endpoints under a Keycloak realm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RealmEndpoint {
    Authorize,
    Token,
    Introspect,
    Userinfo,
}

impl RealmEndpoint {
    fn segments(self) -> &'static [&'static str] {
        match self {
            RealmEndpoint::Authorize => &["auth"],
            RealmEndpoint::Token => &["token"],
            RealmEndpoint::Introspect => &["token", "introspect"],
            RealmEndpoint::Userinfo => &["userinfo"],
        }
    }
}

/// Appends `segments` and `params` to an absolute base URL.
///
/// Segments and query values are percent-encoded by the `url` crate; query
/// parameters keep their insertion order. Fails before any network use when
/// the base does not parse as an absolute URL.
pub fn provider_url(
    base: &str,
    segments: &[&str],
    params: &[(&str, &str)],
) -> Result<Url, ClientError> {
    let mut url = Url::parse(base)?;
    {
        let mut path = url.path_segments_mut().map_err(|_| {
            ClientError::Configuration(format!("`{base}` cannot be used as a base URL"))
        })?;
        path.pop_if_empty();
        path.extend(segments);
    }
    if !params.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (name, value) in params {
            pairs.append_pair(name, value);
        }
    }
    Ok(url)
}

/// Builds `{base}/auth/realms/{realm}/protocol/openid-connect/{endpoint}`.
pub fn realm_url(
    base: &str,
    realm: &str,
    endpoint: RealmEndpoint,
    params: &[(&str, &str)],
) -> Result<Url, ClientError> {
    let mut segments = vec!["auth", "realms", realm, "protocol", "openid-connect"];
    segments.extend_from_slice(endpoint.segments());
    provider_url(base, &segments, params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_canonical_realm_endpoints() {
        let cases = [
            (RealmEndpoint::Authorize, "auth"),
            (RealmEndpoint::Token, "token"),
            (RealmEndpoint::Introspect, "token/introspect"),
            (RealmEndpoint::Userinfo, "userinfo"),
        ];

        for (endpoint, suffix) in cases {
            let url = realm_url("https://example.com", "master", endpoint, &[])
                .expect("url should build");
            assert_eq!(
                url.as_str(),
                format!(
                    "https://example.com/auth/realms/master/protocol/openid-connect/{suffix}"
                )
            );
        }
    }

    #[test]
    fn tolerates_trailing_slash_on_base() {
        let url = realm_url("https://example.com/", "master", RealmEndpoint::Token, &[])
            .expect("url should build");
        assert_eq!(
            url.as_str(),
            "https://example.com/auth/realms/master/protocol/openid-connect/token"
        );
    }

    #[test]
    fn keeps_base_path_prefix() {
        let url = realm_url(
            "https://example.com/keycloak",
            "master",
            RealmEndpoint::Token,
            &[],
        )
        .expect("url should build");
        assert_eq!(
            url.as_str(),
            "https://example.com/keycloak/auth/realms/master/protocol/openid-connect/token"
        );
    }

    #[test]
    fn percent_encodes_realm_segment() {
        let url = realm_url("https://example.com", "my realm", RealmEndpoint::Authorize, &[])
            .expect("url should build");
        assert_eq!(
            url.as_str(),
            "https://example.com/auth/realms/my%20realm/protocol/openid-connect/auth"
        );
    }

    #[test]
    fn preserves_query_parameter_order() {
        let url = provider_url(
            "https://example.com",
            &["auth"],
            &[("b", "2"), ("a", "1"), ("c", "3")],
        )
        .expect("url should build");
        assert_eq!(url.query(), Some("b=2&a=1&c=3"));
    }

    #[test]
    fn percent_encodes_query_values() {
        let url = provider_url(
            "https://example.com",
            &["auth"],
            &[("redirect_uri", "https://go.example.com/plugin/callback")],
        )
        .expect("url should build");
        assert_eq!(
            url.query(),
            Some("redirect_uri=https%3A%2F%2Fgo.example.com%2Fplugin%2Fcallback")
        );
    }

    #[test]
    fn rejects_relative_base() {
        let result = provider_url("example.com/auth", &["token"], &[]);
        assert!(matches!(result, Err(ClientError::UrlParse(_))));
    }
}
