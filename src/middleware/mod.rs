/*
 * Responsibility
 * - Router-level layers: bearer auth, CORS, HTTP cross-cutting concerns
 */
pub mod auth;
pub mod cors;
pub mod http;
