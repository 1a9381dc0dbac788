// Interface adapters: HTTP surface and collaborator clients.

pub mod clients;
pub mod handlers;
pub mod http;
pub mod protocol;
pub mod routes;
pub mod state;
pub mod storage;
