pub mod watch_face;
