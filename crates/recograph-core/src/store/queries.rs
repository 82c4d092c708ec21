//! SQL statements issued against the graph store
//!
//! The store is expected to expose this relational layout (owned and loaded
//! elsewhere):
//!
//! | table                | columns                                     |
//! |----------------------|---------------------------------------------|
//! | `users`              | `id`, `name`                                |
//! | `songs`              | `id`, `title`, `artist`, `year`, `duration` |
//! | `liked_songs`        | `user_id`, `song_id`                        |
//! | `listens`            | `user_id`, `song_id`, `play_count`          |
//! | `song_availability`  | `song_id`, `service`                        |
//! | `movies`             | `id`, `title`, `genre`, `year`, `duration`  |
//! | `movie_similarity`   | `from_id`, `to_id`, `score`                 |
//! | `movie_availability` | `movie_id`, `service`                       |
//! | `subscriptions`      | `user_id`, `service`                        |
//! | `watches`            | `user_id`, `movie_id`, `watch_count`        |
//! | `ratings`            | `user_id`, `movie_id`, `rating`             |
//! | `band_similarity`    | `from_name`, `to_name`, `score`             |
//!
//! Edge statements return `from_id`, `to_id` and a raw `score`; the builder
//! converts scores to distances. User ids match case-insensitively.

/// Users sharing liked songs; `score` is the overlap count
pub const SOCIAL_OVERLAP_EDGES: &str = "
SELECT a.user_id AS from_id, b.user_id AS to_id, COUNT(DISTINCT a.song_id) AS score
FROM liked_songs a
JOIN liked_songs b ON b.song_id = a.song_id AND b.user_id <> a.user_id
GROUP BY a.user_id, b.user_id";

/// Movie similarity, optionally restricted to platforms and to the services
/// one user subscribes to
pub const MOVIE_SIMILARITY_EDGES: &str = "
SELECT s.from_id AS from_id, s.to_id AS to_id, s.score AS score
FROM movie_similarity s
WHERE (json_array_length(:platforms) = 0
       OR EXISTS (SELECT 1 FROM movie_availability av
                  WHERE av.movie_id = s.to_id
                    AND av.service IN (SELECT value FROM json_each(:platforms))))
  AND (:only_user IS NULL
       OR EXISTS (SELECT 1 FROM movie_availability av
                  JOIN subscriptions sub ON sub.service = av.service
                  WHERE av.movie_id = s.to_id
                    AND lower(sub.user_id) = lower(:only_user)))";

pub const BAND_SIMILARITY_EDGES: &str = "
SELECT from_name AS from_id, to_name AS to_id, score
FROM band_similarity";

/// Songs co-listened by the same users; each unordered pair once, with the
/// release-year gap when both years are known
pub const SONG_HYBRID_EDGES: &str = "
SELECT a.song_id AS from_id, b.song_id AS to_id,
       COUNT(DISTINCT a.user_id) AS score,
       CASE WHEN sa.year IS NULL OR sb.year IS NULL THEN NULL
            ELSE ABS(sa.year - sb.year) END AS year_gap
FROM listens a
JOIN listens b ON b.user_id = a.user_id AND b.song_id > a.song_id
LEFT JOIN songs sa ON sa.id = a.song_id
LEFT JOIN songs sb ON sb.id = b.song_id
GROUP BY a.song_id, b.song_id";

/// Movie similarity with both endpoints in one genre
pub const GENRE_FILTERED_EDGES: &str = "
SELECT s.from_id AS from_id, s.to_id AS to_id, s.score AS score
FROM movie_similarity s
JOIN movies ma ON ma.id = s.from_id
JOIN movies mb ON mb.id = s.to_id
WHERE lower(ma.genre) = lower(:genre) AND lower(mb.genre) = lower(:genre)";

/// Direct overlap neighbours of one user, strongest first
pub const USER_OVERLAP_NEIGHBORS: &str = "
SELECT b.user_id AS neighbor, COUNT(DISTINCT a.song_id) AS overlap
FROM liked_songs a
JOIN liked_songs b ON b.song_id = a.song_id AND lower(b.user_id) <> lower(a.user_id)
WHERE lower(a.user_id) = lower(:user)
GROUP BY b.user_id
ORDER BY overlap DESC, neighbor ASC";

/// Every song a user listened to with total plays, most played first
pub const USER_LISTENED_SONGS: &str = "
SELECT song_id AS song, SUM(COALESCE(play_count, 0)) AS plays
FROM listens
WHERE lower(user_id) = lower(:user) AND song_id IS NOT NULL AND trim(song_id) <> ''
GROUP BY song_id
ORDER BY plays DESC, song ASC";

/// A user's watched movies, most watched first
pub const USER_WATCHED_MOVIES: &str = "
SELECT movie_id AS movie, SUM(COALESCE(watch_count, 0)) AS watches
FROM watches
WHERE lower(user_id) = lower(:user) AND movie_id IS NOT NULL AND trim(movie_id) <> ''
GROUP BY movie_id
ORDER BY watches DESC, movie ASC";

/// Average rating and total watches for every movie
pub const MOVIE_POPULARITY: &str = "
SELECT m.id AS movie,
       COALESCE((SELECT AVG(r.rating) FROM ratings r WHERE r.movie_id = m.id), 0.0) AS rating,
       COALESCE((SELECT SUM(w.watch_count) FROM watches w WHERE w.movie_id = m.id), 0) AS watch_count
FROM movies m
ORDER BY m.id";

/// Total plays per song, optionally restricted to platforms
pub const SONG_PLAY_TOTALS: &str = "
SELECT l.song_id AS id, SUM(COALESCE(l.play_count, 0)) AS plays
FROM listens l
WHERE json_array_length(:platforms) = 0
   OR EXISTS (SELECT 1 FROM song_availability av
              WHERE av.song_id = l.song_id
                AND av.service IN (SELECT value FROM json_each(:platforms)))
GROUP BY l.song_id
ORDER BY l.song_id";

/// Total watches per movie with its genre
pub const MOVIE_WATCH_TOTALS: &str = "
SELECT w.movie_id AS id, m.genre AS genre, SUM(COALESCE(w.watch_count, 0)) AS watches
FROM watches w
LEFT JOIN movies m ON m.id = w.movie_id
GROUP BY w.movie_id
ORDER BY w.movie_id";

pub const GENRE_WATCH_TOTALS: &str = "
SELECT w.movie_id AS id, SUM(COALESCE(w.watch_count, 0)) AS watches
FROM watches w
JOIN movies m ON m.id = w.movie_id
WHERE lower(m.genre) = lower(:genre)
GROUP BY w.movie_id
ORDER BY w.movie_id";

/// A user's most watched movies
pub const USER_TOP_WATCHED: &str = "
SELECT w.movie_id AS id, m.genre AS genre, SUM(COALESCE(w.watch_count, 0)) AS watches
FROM watches w
LEFT JOIN movies m ON m.id = w.movie_id
WHERE lower(w.user_id) = lower(:user)
GROUP BY w.movie_id
ORDER BY watches DESC, id ASC
LIMIT :limit";

/// Movies a user has not watched, not excluded, rated at least `:min_rating`
pub const MARATHON_CANDIDATES: &str = "
SELECT m.id AS id, m.title AS title, m.genre AS genre, m.duration AS duration,
       COALESCE((SELECT AVG(r.rating) FROM ratings r WHERE r.movie_id = m.id), 0.0) AS rating
FROM movies m
WHERE m.duration IS NOT NULL AND m.duration > 0
  AND NOT EXISTS (SELECT 1 FROM watches w
                  WHERE w.movie_id = m.id AND lower(w.user_id) = lower(:user))
  AND m.id NOT IN (SELECT value FROM json_each(:exclude))
  AND COALESCE((SELECT AVG(r.rating) FROM ratings r WHERE r.movie_id = m.id), 0.0) >= :min_rating
ORDER BY rating DESC, m.title ASC";

/// Songs a user has listened to, with global play counts, most played first
pub const PLAYLIST_CANDIDATES: &str = "
SELECT s.id AS id, s.title AS title, s.artist AS artist, s.duration AS duration,
       COALESCE((SELECT SUM(COALESCE(p.play_count, 0)) FROM listens p
                 WHERE p.song_id = s.id), 0) AS popularity
FROM songs s
WHERE EXISTS (SELECT 1 FROM listens l
              WHERE l.song_id = s.id AND lower(l.user_id) = lower(:user))
ORDER BY popularity DESC, COALESCE(s.title, s.id) ASC
LIMIT :limit";
