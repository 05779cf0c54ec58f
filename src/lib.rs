//! Poseidon backend: API REST CRUD pour les données de référence
//! (offres, points de courbe, notations, règles, trades) et gestion
//! des comptes utilisateurs.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;
