
mod dataset;
