use crate::Chips;
use crate::Probability;
use crate::gameplay::Action;
use rand::Rng;

/// Probability of mapping a bet of size `x` down to the smaller size `a`
/// rather than up to `b`, with every size expressed as a fraction of the
/// pot and `a <= x <= b`.
///
/// f(x) = (b - x)(1 + a) / ((b - a)(1 + x))
pub fn pseudo_harmonic(a: f32, b: f32, x: f32) -> Probability {
    assert!(a < b, "translation bounds must differ");
    assert!(a <= x && x <= b, "bet outside translation bounds");
    ((b - x) * (1. + a)) / ((b - a) * (1. + x))
}

/// Maps an arbitrary bet of `amount` chips onto one of the abstracted
/// aggressive actions in `legal`.
///
/// Exact matches map to themselves and a bet above the largest size
/// clamps to it. A bet between two sizes picks one of its neighbours at
/// random, weighted by [`pseudo_harmonic`] over pot fractions. A bet
/// below the smallest legal size is rejected, as is any bet when no
/// aggressive action is legal.
pub fn translate<R: Rng>(amount: Chips, pot: Chips, legal: &[Action], rng: &mut R) -> anyhow::Result<Action> {
    let mut sizes = legal
        .iter()
        .copied()
        .filter(Action::is_aggressive)
        .collect::<Vec<_>>();
    sizes.sort_by_key(Action::chips);
    let (Some(first), Some(last)) = (sizes.first().copied(), sizes.last().copied()) else {
        anyhow::bail!("raising is not allowed here");
    };
    anyhow::ensure!(
        amount >= first.chips(),
        "smallest legal raise adds {}, got {}",
        first.chips(),
        amount
    );
    if amount >= last.chips() {
        return Ok(last);
    }
    if let Some(exact) = sizes.iter().find(|a| a.chips() == amount) {
        return Ok(*exact);
    }
    let (lo, hi) = sizes
        .windows(2)
        .map(|w| (w[0], w[1]))
        .find(|(lo, hi)| lo.chips() < amount && amount < hi.chips())
        .expect("amount lies strictly inside the abstracted range");
    let pot = pot.max(1) as f32;
    let p = pseudo_harmonic(
        lo.chips() as f32 / pot,
        hi.chips() as f32 / pot,
        amount as f32 / pot,
    );
    match rng.random::<Probability>() < p {
        true => Ok(lo),
        false => Ok(hi),
    }
}
