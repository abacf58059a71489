//! Forward propagation along a four variable chain a -> b -> c -> d by variable elimination.
//!
//! Run with `RUST_LOG=debug` to watch each elimination step.

use ndarray::array;
use sumproduct as s;

fn main() -> s::Result<()> {
    env_logger::init();

    let vars: Vec<s::Variable> = ["a", "b", "c", "d"].iter().map(|&n| s::Variable::new(n)).collect();
    let transition = array![[0.7, 0.3], [0.1, 0.9]].into_dyn();

    let model = s::FactorCollection::new(vec![
        s::Factor::new(vec![vars[0].clone()], array![0.8, 0.2].into_dyn())?,
        s::Factor::new(vec![vars[0].clone(), vars[1].clone()], transition.clone())?,
        s::Factor::new(vec![vars[1].clone(), vars[2].clone()], transition.clone())?,
        s::Factor::new(vec![vars[2].clone(), vars[3].clone()], transition)?,
    ]);

    // eliminating b first costs a three variable intermediate factor, but gives the same answer
    let orderings = vec![
        vec![vars[0].clone(), vars[1].clone(), vars[2].clone()],
        vec![vars[1].clone(), vars[0].clone(), vars[2].clone()],
    ];

    for ordering in orderings.iter() {
        let mut query = model.clone();
        let result = query.eliminate(ordering)?;

        let names: Vec<&str> = ordering.iter().map(|v| v.name()).collect();
        println!("Eliminating {:?} (induced width {}):", names, query.induced_width());
        println!("{}\n", result);
    }

    Ok(())
}
