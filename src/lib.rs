pub mod configuration;
pub mod connectors;
pub mod console;
pub mod db;
pub mod forms;
pub mod helpers;
pub mod livestream;
pub mod middleware;
pub mod mobile;
pub mod models;
pub mod routes;
pub mod startup;
pub mod telemetry;
pub mod views;
