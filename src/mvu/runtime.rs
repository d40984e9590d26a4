use crate::mvu::round::{Deps, Msg, RoundModel, run_effect, update};

/// Runs the MVU loop for a round: applies `init_msg` and drains the effects it
/// produces. Lookup failures are recorded on the model as notices and do not
/// stop the loop.
pub async fn run_round(model: &mut RoundModel, init_msg: Msg, deps: Deps<'_>) {
    let mut effects = update(model, init_msg);
    while let Some(effect) = effects.pop() {
        let msg = run_effect(effect, model.session.id(), deps).await;
        effects.extend(update(model, msg));
    }
}
