use crate::error::{MealError, Result};
use crate::types::{Meal, Quantity};
use rand::Rng;

/// Draw `count` meals from the catalog uniformly at random, with
/// replacement.
///
/// Every draw is independent, so the same meal can land in one list more
/// than once. The repetition is intentional and kept as-is downstream;
/// do not switch this to distinct-meal sampling.
pub fn select_meals<'a, R: Rng>(
    catalog: &'a [Meal],
    count: usize,
    rng: &mut R,
) -> Result<Vec<&'a Meal>> {
    if catalog.is_empty() {
        return Err(MealError::EmptyCatalog);
    }

    let selected = (0..count)
        .map(|_| &catalog[rng.gen_range(0..catalog.len())])
        .collect();

    Ok(selected)
}

/// Flatten the selected meals into `(ingredient, quantity)` lines.
///
/// Lines follow selection order, then each meal's own ingredient order.
/// Repeated ingredient names stay as separate lines; quantities are never
/// summed.
pub fn aggregate(selected: &[&Meal]) -> Vec<(String, Quantity)> {
    let mut lines = Vec::new();
    for meal in selected {
        for (ingredient, quantity) in &meal.ingredients {
            lines.push((ingredient.clone(), quantity.clone()));
        }
    }
    lines
}

/// Produce one shopping list worth of lines from the full catalog.
pub fn select_and_aggregate<R: Rng>(
    catalog: &[Meal],
    count: usize,
    rng: &mut R,
) -> Result<Vec<(String, Quantity)>> {
    let selected = select_meals(catalog, count, rng)?;
    Ok(aggregate(&selected))
}

/// Render the lines as the SMS body, one `<ingredient> : <quantity>` line
/// per entry, in input order. Deterministic for a given input.
pub fn format_report(lines: &[(String, Quantity)]) -> String {
    let mut body = String::new();
    for (ingredient, quantity) in lines {
        body.push_str(&format!("{ingredient} : {quantity}\n"));
    }
    body
}
