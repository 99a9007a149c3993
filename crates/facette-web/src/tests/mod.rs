mod harness;
mod headers;
mod reload;
mod stats;
