//! Board model: cell states, snapshots, the playable minefield, and file I/O

pub mod field;
pub mod io;
pub mod state;

pub use field::Minefield;
pub use io::{
    create_example_states, load_layout_from_file, load_view_from_file, parse_layout, parse_view,
    save_layout_to_file, save_view_to_file,
};
pub use state::{BoardView, CellState, MineBoard};
