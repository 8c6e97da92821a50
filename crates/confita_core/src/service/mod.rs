//! Use-case services over the conference repository.

pub mod conference_service;
