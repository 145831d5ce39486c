// Application layer: concrete pipelines wired from domain ports.

pub mod pipelines;
