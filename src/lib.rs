//! Match-three puzzle engine.
//!
//! Owns a rectangular board of typed pieces, finds runs of matching pieces,
//! performs swap / remove / refill transitions, and spawns bonus pieces from
//! recognized shapes. Rendering, animation and input belong to the host; it
//! drives the engine one synchronous call at a time through [`Controller`].
//!
//! Boards are stored column-major: `columns[c][r]` is the cell at
//! `Index { column: c, row: r }`, row 0 at the bottom.
//!
//! On `wasm32` a `Match3` class over the built-in [`Shape`] pieces is
//! exported to JavaScript.

pub mod controller;
pub mod error;
pub mod filling;
pub mod generator;
pub mod geometry;
pub mod grid;
pub mod matcher;
pub mod partition;
pub mod pattern;
pub mod rng;
pub mod shape;

#[cfg(test)]
mod test_support;

pub use controller::{Controller, ControllerConfig, MatchResult, RefillPolicy};
pub use error::ConfigError;
pub use filling::Filling;
pub use generator::Generator;
pub use geometry::{Direction, Index, Indices, Size};
pub use grid::{Cell, CellId, Grid};
pub use matcher::Matcher;
pub use pattern::Pattern;
pub use rng::GameRng;
pub use shape::Shape;

// ─── WASM Exports (only compiled for wasm32 target) ─────────────────────────

#[cfg(target_arch = "wasm32")]
mod wasm_exports {
    use wasm_bindgen::prelude::*;
    use crate::controller::{Controller, RefillPolicy};
    use crate::geometry::{Index, Indices, Size};
    use crate::shape::Shape;

    /// Flat `[column, row, column, row, ...]` pairs to a set.
    fn indices_from_flat(flat: &[i32]) -> Indices {
        flat.chunks_exact(2).map(|p| Index::new(p[0], p[1])).collect()
    }

    fn indices_to_flat(indices: &Indices) -> js_sys::Int32Array {
        let flat: Vec<i32> = indices.iter().flat_map(|i| [i.column, i.row]).collect();
        let arr = js_sys::Int32Array::new_with_length(flat.len() as u32);
        arr.copy_from(&flat);
        arr
    }

    fn index_object(index: Index) -> JsValue {
        let obj = js_sys::Object::new();
        js_sys::Reflect::set(&obj, &"column".into(), &index.column.into()).unwrap();
        js_sys::Reflect::set(&obj, &"row".into(), &index.row.into()).unwrap();
        obj.into()
    }

    /// Engine over the built-in shapes. Index arguments are flat
    /// `Int32Array` pairs in column-major order.
    #[wasm_bindgen(js_name = "Match3")]
    pub struct WasmMatch3 {
        inner: Controller<Shape>,
    }

    #[wasm_bindgen(js_class = "Match3")]
    impl WasmMatch3 {
        /// Generate a fresh board. Throws on a board smaller than 3x3.
        #[wasm_bindgen(constructor)]
        pub fn new(columns: i32, rows: i32, seed: Option<u32>) -> Result<WasmMatch3, JsError> {
            let mut config = Shape::config(Size::new(columns, rows));
            config.seed = seed.map(u64::from);
            let inner = Controller::new(config)?;
            Ok(Self { inner })
        }

        /// The board as `{ size: { columns, rows }, columns: [[{ id, filling }]] }`.
        #[wasm_bindgen(js_name = "grid")]
        pub fn grid(&self) -> Result<JsValue, JsError> {
            Ok(serde_wasm_bindgen::to_value(self.inner.grid())?)
        }

        #[wasm_bindgen(js_name = "canSwap")]
        pub fn can_swap(&self, column: i32, row: i32, target_column: i32, target_row: i32) -> bool {
            self.inner
                .can_swap_cell(Index::new(column, row), Index::new(target_column, target_row))
        }

        #[wasm_bindgen(js_name = "shouldSwap")]
        pub fn should_swap(&self, column: i32, row: i32, target_column: i32, target_row: i32) -> bool {
            self.inner
                .should_swap_cell(Index::new(column, row), Index::new(target_column, target_row))
        }

        /// Swap on the live board and return the matched indices.
        #[wasm_bindgen(js_name = "swapAndMatch")]
        pub fn swap_and_match(
            &mut self,
            column: i32,
            row: i32,
            target_column: i32,
            target_row: i32,
        ) -> js_sys::Int32Array {
            let matched = self
                .inner
                .swap_and_match_cell(Index::new(column, row), Index::new(target_column, target_row));
            indices_to_flat(&matched)
        }

        /// Resolve a match. `policy` is `"spill"` or `"regenerate"`.
        /// Returns `{ removed, spawned: [{ index, cell }], refilled }`.
        #[wasm_bindgen(js_name = "resolve")]
        pub fn resolve(&mut self, indices: &[i32], swap: &[i32], policy: &str) -> Result<JsValue, JsError> {
            let policy = match policy {
                "spill" => RefillPolicy::Spill,
                "regenerate" => RefillPolicy::Regenerate,
                other => return Err(JsError::new(&format!("unknown refill policy: {other}"))),
            };
            let result = self.inner.resolve_match(
                &indices_from_flat(indices),
                &indices_from_flat(swap),
                policy,
            );
            Ok(serde_wasm_bindgen::to_value(&result)?)
        }

        #[wasm_bindgen(js_name = "findAllMatches")]
        pub fn find_all_matches(&self) -> js_sys::Int32Array {
            indices_to_flat(&self.inner.find_all_matches())
        }

        /// Hint: `{ from: { column, row }, to: { column, row } }` or `null`.
        #[wasm_bindgen(js_name = "findPossibleSwap")]
        pub fn find_possible_swap(&self) -> JsValue {
            match self.inner.find_possible_swap() {
                Some((from, to)) => {
                    let obj = js_sys::Object::new();
                    js_sys::Reflect::set(&obj, &"from".into(), &index_object(from)).unwrap();
                    js_sys::Reflect::set(&obj, &"to".into(), &index_object(to)).unwrap();
                    obj.into()
                }
                None => JsValue::NULL,
            }
        }
    }

    /// Ping function to verify WASM is loaded.
    #[wasm_bindgen(js_name = "ping")]
    pub fn wasm_ping() -> String {
        "match3 engine ready".to_string()
    }
}
