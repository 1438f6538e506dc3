/// Random sampling without replacement.
///
/// Draws one element at a time from the shrinking candidate list, so the
/// result keeps draw order. Asking for more elements than there are
/// candidates returns all of them.

use rand::Rng;

pub fn pick_n<T: Clone, R: Rng + ?Sized>(rng: &mut R, n: usize, candidates: &[T]) -> Vec<T> {
    let mut remaining = candidates.to_vec();
    let mut picked = Vec::with_capacity(n.min(remaining.len()));
    while picked.len() < n && !remaining.is_empty() {
        let idx = rng.gen_range(0..remaining.len());
        picked.push(remaining.remove(idx));
    }
    picked
}
