//! In-memory stand-ins for the transport and credential seams.
//!
//! Services are unit tested against these so request construction, status
//! handling and decoding can be checked without sockets.

#[cfg(test)]
mod mock_credential;
#[cfg(test)]
mod mock_transport;

#[cfg(test)]
pub use mock_credential::MockTokenCredential;
#[cfg(test)]
pub use mock_transport::MockHttpTransport;
