//! Maps API wire layer.
//!
//! Everything that crosses the network boundary lives here: the transport
//! client abstraction, the ephemeral request value object, the serde model
//! of the server's instantiation response, and the two payload serializers
//! (anonymous and named).

mod client;
mod error;
mod request;
mod response;
pub mod serializer;

pub use client::{MapsApiClient, ReqwestMapsClient};
pub use error::TransportError;
pub use request::{instantiation_url, MapRequest, RequestParams};
pub use response::{
    DataviewMetadata, DataviewUrls, LayerMetadata, MapResponse, Response, ResponseMetadata,
};
pub use serializer::{MapSerializer, SerializationError};

#[cfg(test)]
pub use client::tests::MockMapsClient;
