mod client;
mod request;
mod routes;
mod transport;

pub(crate) use client::GatewayClient;
pub(crate) use transport::HttpTransport;
