use crate::{board::Position, movegen::legal_moves_into, rules::apply_move, types::Move};

/// Pure perft node count.
/// Counts all legal move paths from `pos` down to `depth`.
pub fn perft(pos: &Position, depth: u8) -> u64 {
    fn inner(pos: &Position, depth: u8, layers: &mut [Vec<Move>]) -> u64 {
        if depth == 0 {
            return 1;
        }
        let Some((buf, rest)) = layers.split_first_mut() else {
            return 1;
        };

        legal_moves_into(pos, buf);
        if depth == 1 {
            return buf.len() as u64;
        }

        let mut nodes = 0u64;
        for mv in buf.iter() {
            let next = apply_move(pos, mv);
            nodes += inner(&next, depth - 1, rest);
        }
        nodes
    }

    let mut layers = vec![Vec::with_capacity(64); depth as usize];
    inner(pos, depth, &mut layers[..])
}

/// Node counts split by root move, for locating enumeration bugs.
pub fn perft_divide(pos: &Position, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    let mut roots = Vec::with_capacity(64);
    legal_moves_into(pos, &mut roots);
    roots
        .into_iter()
        .map(|mv| (mv, perft(&apply_move(pos, &mv), depth - 1)))
        .collect()
}
