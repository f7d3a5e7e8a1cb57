mod applicants;
mod common;
