use crate::gateway::{ApiError, HttpResponse};
use crate::{
    LoginRequest, LoginResponse, Order, OrderId, OrderPayload, Person, PersonId, PersonPayload,
    RegisterRequest,
};
use serde::{Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest {
    /// The JSON body sent with this request (`()` when there is none).
    type Body: Serialize;
    /// The response type returned by this request.
    type Response;
    /// The HTTP method.
    const METHOD: HttpMethod;

    /// The URL path, relative to the configured base URL.
    fn path(&self) -> String;

    fn body(&self) -> Option<&Self::Body> {
        None
    }

    /// Parse a successful (2xx) response.
    fn parse(response: &HttpResponse) -> Result<Self::Response, ApiError>;
}

fn parse_json<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    response.json()
}

// =========================================================
// Pessoas
// =========================================================

/// List all people
#[derive(Debug)]
pub struct ListPeople;

impl ApiRequest for ListPeople {
    type Body = ();
    type Response = Vec<Person>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/pessoas".to_string()
    }

    fn parse(response: &HttpResponse) -> Result<Self::Response, ApiError> {
        parse_json(response)
    }
}

#[derive(Debug)]
pub struct CreatePerson(pub PersonPayload);

impl ApiRequest for CreatePerson {
    type Body = PersonPayload;
    // The created record is reloaded together with the list, so the body is ignored.
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/pessoas".to_string()
    }

    fn body(&self) -> Option<&PersonPayload> {
        Some(&self.0)
    }

    fn parse(_: &HttpResponse) -> Result<(), ApiError> {
        Ok(())
    }
}

#[derive(Debug)]
pub struct UpdatePerson {
    pub id: PersonId,
    pub payload: PersonPayload,
}

impl ApiRequest for UpdatePerson {
    type Body = PersonPayload;
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/pessoas/{}", self.id)
    }

    fn body(&self) -> Option<&PersonPayload> {
        Some(&self.payload)
    }

    fn parse(_: &HttpResponse) -> Result<(), ApiError> {
        Ok(())
    }
}

/// Delete a person. 409 when orders still reference it, 404 when it is gone.
#[derive(Debug)]
pub struct DeletePerson {
    pub id: PersonId,
}

impl ApiRequest for DeletePerson {
    type Body = ();
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/pessoas/{}", self.id)
    }

    fn parse(_: &HttpResponse) -> Result<(), ApiError> {
        Ok(())
    }
}

// =========================================================
// Pedidos
// =========================================================

#[derive(Debug)]
pub struct ListOrders;

impl ApiRequest for ListOrders {
    type Body = ();
    type Response = Vec<Order>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/pedidos".to_string()
    }

    fn parse(response: &HttpResponse) -> Result<Self::Response, ApiError> {
        parse_json(response)
    }
}

#[derive(Debug)]
pub struct CreateOrder(pub OrderPayload);

impl ApiRequest for CreateOrder {
    type Body = OrderPayload;
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/pedidos".to_string()
    }

    fn body(&self) -> Option<&OrderPayload> {
        Some(&self.0)
    }

    fn parse(_: &HttpResponse) -> Result<(), ApiError> {
        Ok(())
    }
}

#[derive(Debug)]
pub struct UpdateOrder {
    pub id: OrderId,
    pub payload: OrderPayload,
}

impl ApiRequest for UpdateOrder {
    type Body = OrderPayload;
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Put;

    fn path(&self) -> String {
        format!("/pedidos/{}", self.id)
    }

    fn body(&self) -> Option<&OrderPayload> {
        Some(&self.payload)
    }

    fn parse(_: &HttpResponse) -> Result<(), ApiError> {
        Ok(())
    }
}

#[derive(Debug)]
pub struct DeleteOrder {
    pub id: OrderId,
}

impl ApiRequest for DeleteOrder {
    type Body = ();
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/pedidos/{}", self.id)
    }

    fn parse(_: &HttpResponse) -> Result<(), ApiError> {
        Ok(())
    }
}

// =========================================================
// Auth
// =========================================================

#[derive(Debug)]
pub struct Login(pub LoginRequest);

impl ApiRequest for Login {
    type Body = LoginRequest;
    type Response = LoginResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/auth/login".to_string()
    }

    fn body(&self) -> Option<&LoginRequest> {
        Some(&self.0)
    }

    fn parse(response: &HttpResponse) -> Result<LoginResponse, ApiError> {
        parse_json(response)
    }
}

/// Register a user. Only administrators may do this; the backend checks the token.
#[derive(Debug)]
pub struct Register(pub RegisterRequest);

impl ApiRequest for Register {
    type Body = RegisterRequest;
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/auth/register".to_string()
    }

    fn body(&self) -> Option<&RegisterRequest> {
        Some(&self.0)
    }

    fn parse(_: &HttpResponse) -> Result<(), ApiError> {
        Ok(())
    }
}
