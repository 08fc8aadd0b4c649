//! Integration suite for the directory. Tests live in sibling files and
//! talk to a real MongoDB named by `TEST_DATABASE_URL`.
