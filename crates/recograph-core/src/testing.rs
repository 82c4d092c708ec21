//! Shared test fixtures: an in-memory store with a small seeded dataset
//! and a store double whose every read fails.

use rusqlite::Connection;

use crate::error::{RecoError, Result};
use crate::store::{GraphStore, Row, SqliteStore, Value};

pub const SCHEMA: &str = "
CREATE TABLE users (id TEXT PRIMARY KEY, name TEXT);
CREATE TABLE songs (id TEXT PRIMARY KEY, title TEXT, artist TEXT, year INTEGER, duration INTEGER);
CREATE TABLE liked_songs (user_id TEXT, song_id TEXT);
CREATE TABLE listens (user_id TEXT, song_id TEXT, play_count INTEGER);
CREATE TABLE song_availability (song_id TEXT, service TEXT);
CREATE TABLE movies (id TEXT PRIMARY KEY, title TEXT, genre TEXT, year INTEGER, duration INTEGER);
CREATE TABLE movie_similarity (from_id TEXT, to_id TEXT, score REAL);
CREATE TABLE movie_availability (movie_id TEXT, service TEXT);
CREATE TABLE subscriptions (user_id TEXT, service TEXT);
CREATE TABLE watches (user_id TEXT, movie_id TEXT, watch_count INTEGER);
CREATE TABLE ratings (user_id TEXT, movie_id TEXT, rating REAL);
CREATE TABLE band_similarity (from_name TEXT, to_name TEXT, score REAL);
";

/// alice-bob share two liked songs, alice-carol and carol-dave one each;
/// erin has no activity at all. Movie m6 has no similarity edges.
pub const SEED_DATA: &str = "
INSERT INTO users VALUES ('alice','Alice'),('bob','Bob'),('carol','Carol'),('dave','Dave'),('erin','Erin');
INSERT INTO songs VALUES
  ('s1','One','A',2001,200),('s2','Two','A',2011,180),('s3','Three','C',1990,240),
  ('s4','Four','D',NULL,NULL),('s5','Five','E',2020,300);
INSERT INTO liked_songs VALUES
  ('alice','s1'),('alice','s2'),('alice','s3'),
  ('bob','s1'),('bob','s2'),('bob','s4'),
  ('carol','s3'),('carol','s5'),
  ('dave','s5');
INSERT INTO listens VALUES
  ('alice','s1',5),('alice','s2',3),
  ('bob','s1',2),('bob','s2',1),('bob','s3',4),
  ('carol','s3',2),('carol','s5',7),
  ('dave','s4',1),('dave','s5',3);
INSERT INTO song_availability VALUES
  ('s1','Spotify'),('s2','Spotify'),('s3','Spotify'),('s5','Tidal');
INSERT INTO movies VALUES
  ('m1','Heat','Drama',1995,170),('m2','Arrival','Drama',2016,116),
  ('m3','Sicario','Drama',2015,121),('m4','Alien','SciFi',1979,117),
  ('m5','Up','Animation',2009,96),('m6','Solaris','SciFi',1972,167);
INSERT INTO movie_similarity VALUES
  ('m1','m2',3),('m2','m3',2),('m1','m3',1),
  ('m3','m4',1),('m4','m5',2),('m2','m5',1);
INSERT INTO movie_availability VALUES
  ('m1','Netflix'),('m2','Netflix'),('m5','Netflix'),
  ('m3','Hulu'),('m4','Hulu'),('m6','Max');
INSERT INTO subscriptions VALUES ('alice','Netflix'),('bob','Hulu'),('bob','Netflix');
INSERT INTO watches VALUES
  ('alice','m1',2),('alice','m2',1),
  ('bob','m3',1),('bob','m4',3),
  ('carol','m1',1);
INSERT INTO ratings VALUES
  ('alice','m1',5),('alice','m2',4),
  ('bob','m3',3),('bob','m4',5),
  ('carol','m1',4),('carol','m5',4);
INSERT INTO band_similarity VALUES ('Radiohead','Muse',4),('Muse','Coldplay',2);
";

/// An in-memory store with [`SCHEMA`] and [`SEED_DATA`] loaded
pub fn seeded_store() -> SqliteStore {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(SCHEMA).unwrap();
    conn.execute_batch(SEED_DATA).unwrap();
    SqliteStore::from_connection(conn)
}

/// An in-memory store with the layout but no rows
pub fn empty_store() -> SqliteStore {
    store_with("")
}

/// An in-memory store with the layout and only the rows in `data`
pub fn store_with(data: &str) -> SqliteStore {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(SCHEMA).unwrap();
    conn.execute_batch(data).unwrap();
    SqliteStore::from_connection(conn)
}

/// Every read fails as a locked database would
pub struct FailingStore;

impl GraphStore for FailingStore {
    fn query(&self, _statement: &str, _params: &[(&str, Value)]) -> Result<Vec<Row>> {
        Err(RecoError::Store(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_BUSY),
            Some("database is locked".to_string()),
        )))
    }
}
