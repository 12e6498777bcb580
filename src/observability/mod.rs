// Observability: metrics recorded by the loader, filter and calendar passes

pub mod metrics;
