//! HTTP implementation of the service traits.
//!
//! [`HttpClient`] talks to a running fruitvendor server over the JSON API in
//! [`crate::routes`]. Error bodies are turned back into the matching
//! [`fruitvendor_core::Error`] variant, so callers can treat a remote service
//! exactly like a local store. Backend detail never crosses the wire: any
//! server-side failure arrives as `Error::Internal`.
//!
//! The services use `reqwest`'s blocking client and must not be called from
//! inside an async runtime.

use reqwest::blocking::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use fruitvendor_core::{
    Client, Error, Product, ProductId, ProductService, Result, User, UserId, UserService,
};

use crate::error::ErrorResponse;
use crate::routes::products::{ProductRequest, ProductResponse, ProductsResponse};
use crate::routes::users::{UserRequest, UserResponse, UsersResponse};

/// Client for a remote fruitvendor server.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Remote,
}

#[derive(Debug, Clone)]
struct Remote {
    base: Url,
    http: reqwest::blocking::Client,
}

impl HttpClient {
    /// Create a client for the server at `base` (e.g. `http://127.0.0.1:3000`).
    #[must_use]
    pub fn new(base: Url) -> Self {
        Self {
            inner: Remote {
                base,
                http: reqwest::blocking::Client::new(),
            },
        }
    }

    /// Base URL of the remote server.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.inner.base
    }
}

impl Client for HttpClient {
    type Products = HttpProductService;
    type Users = HttpUserService;

    fn product_service(&self) -> HttpProductService {
        HttpProductService {
            remote: self.inner.clone(),
        }
    }

    fn user_service(&self) -> HttpUserService {
        HttpUserService {
            remote: self.inner.clone(),
        }
    }
}

impl Remote {
    /// Build `<base>/<segments...>`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| Error::backend(format!("invalid base url: {}", self.base)))?
            .clear()
            .extend(segments);
        Ok(url)
    }
}

/// Execute a request and decode either the success body or the error body.
fn execute<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
    let response = request.send().map_err(Error::backend)?;
    decode(response)
}

fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return response.json::<T>().map_err(Error::backend);
    }

    let body: ErrorResponse = response.json().map_err(Error::backend)?;
    debug!(%status, err = %body.err, "Remote call failed");
    Err(Error::from_message(&body.err))
}

/// [`ProductService`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpProductService {
    remote: Remote,
}

impl ProductService for HttpProductService {
    fn product(&self, id: &ProductId) -> Result<Product> {
        if id.is_empty() {
            return Err(Error::ProductIdRequired);
        }

        let url = self.remote.endpoint(&["api", "products", id.as_str()])?;
        let response: ProductResponse = execute(self.remote.http.get(url))?;
        Ok(response.product)
    }

    fn products(&self) -> Result<Vec<Product>> {
        let url = self.remote.endpoint(&["api", "products"])?;
        let response: ProductsResponse = execute(self.remote.http.get(url))?;
        Ok(response.products)
    }

    fn create_product(&self, product: &mut Product) -> Result<()> {
        let url = self.remote.endpoint(&["api", "products"])?;
        let token = product.token.clone();
        let body = ProductRequest {
            product: Some(product.clone()),
            token: token.clone(),
        };

        let response: ProductResponse = execute(self.remote.http.post(url).json(&body))?;

        // The server never echoes the token back.
        *product = Product {
            token,
            ..response.product
        };
        Ok(())
    }

    fn update_product(&self, id: &ProductId, product: &Product) -> Result<Product> {
        if id.is_empty() {
            return Err(Error::ProductIdRequired);
        }

        let url = self.remote.endpoint(&["api", "products", id.as_str()])?;
        let body = ProductRequest {
            product: Some(product.clone()),
            token: String::new(),
        };

        let response: ProductResponse = execute(self.remote.http.patch(url).json(&body))?;
        Ok(response.product)
    }

    fn delete_product(&self, id: &ProductId, token: &str) -> Result<()> {
        if id.is_empty() {
            return Err(Error::ProductIdRequired);
        }

        let mut url = self.remote.endpoint(&["api", "products", id.as_str()])?;
        url.query_pairs_mut().append_pair("token", token);

        let _: serde_json::Value = execute(self.remote.http.delete(url))?;
        Ok(())
    }
}

/// [`UserService`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpUserService {
    remote: Remote,
}

impl UserService for HttpUserService {
    fn user(&self, id: &UserId) -> Result<User> {
        if id.is_empty() {
            return Err(Error::UserIdRequired);
        }

        let url = self.remote.endpoint(&["api", "users", id.as_str()])?;
        let response: UserResponse = execute(self.remote.http.get(url))?;
        Ok(response.user)
    }

    fn users(&self) -> Result<Vec<User>> {
        let url = self.remote.endpoint(&["api", "users"])?;
        let response: UsersResponse = execute(self.remote.http.get(url))?;
        Ok(response.users)
    }

    fn create_user(&self, user: &mut User) -> Result<()> {
        let url = self.remote.endpoint(&["api", "users"])?;
        let body = UserRequest {
            user: Some(user.clone()),
        };

        let response: UserResponse = execute(self.remote.http.post(url).json(&body))?;
        *user = response.user;
        Ok(())
    }

    fn update_user(&self, id: &UserId, user: &User) -> Result<User> {
        if id.is_empty() {
            return Err(Error::UserIdRequired);
        }

        let url = self.remote.endpoint(&["api", "users", id.as_str()])?;
        let body = UserRequest {
            user: Some(user.clone()),
        };

        let response: UserResponse = execute(self.remote.http.patch(url).json(&body))?;
        Ok(response.user)
    }

    fn delete_user(&self, id: &UserId) -> Result<()> {
        if id.is_empty() {
            return Err(Error::UserIdRequired);
        }

        let url = self.remote.endpoint(&["api", "users", id.as_str()])?;
        let _: serde_json::Value = execute(self.remote.http.delete(url))?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> HttpClient {
        HttpClient::new(Url::parse(base).unwrap())
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let remote = client("http://127.0.0.1:3000").inner;

        let url = remote.endpoint(&["api", "products", "a b/c"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:3000/api/products/a%20b%2Fc");
    }

    #[test]
    fn test_endpoint_replaces_base_path() {
        let remote = client("http://127.0.0.1:3000/ignored/").inner;

        let url = remote.endpoint(&["api", "users"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:3000/api/users");
    }

    #[test]
    fn test_endpoint_rejects_opaque_base() {
        let remote = client("mailto:fruit@example.com").inner;
        assert!(matches!(
            remote.endpoint(&["api"]),
            Err(Error::Backend(_))
        ));
    }

    #[test]
    fn test_empty_ids_fail_locally() {
        let c = client("http://127.0.0.1:9");

        assert!(matches!(
            c.product_service().product(&ProductId::default()),
            Err(Error::ProductIdRequired)
        ));
        assert!(matches!(
            c.product_service().delete_product(&ProductId::default(), "t"),
            Err(Error::ProductIdRequired)
        ));
        assert!(matches!(
            c.user_service().user(&UserId::default()),
            Err(Error::UserIdRequired)
        ));
    }
}
