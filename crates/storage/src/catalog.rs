//! Talk-type catalog: minisymposium codes and the labels shown for them.

use crate::Talk;

pub const PLENARY: &str = "Plenary";
pub const CONTRIBUTED_CODE: &str = "CT";
pub const CONTRIBUTED_LABEL: &str = "Contributed talks";

/// Minisymposium codes in programme order.
pub const MINISYMPOSIA: [(&str, &str); 35] = [
    ("MS1", "Embracing new opportunities in numerical linear algebra"),
    ("MS2", "Combinatorial matrix theory"),
    ("MS3", "Matrix inequalities with applications"),
    ("MS4", "Linear algebra methods for inverse problems and data assimilation"),
    ("MS5", "Advances in matrix equations: Theory, computations, and applications"),
    ("MS6", "Model reduction"),
    ("MS7", "Linear algebra and quantum information science"),
    ("MS8", "Tensor and quantum information science"),
    ("MS9", "Total positivity"),
    ("MS10", "Matrix means and related topics"),
    ("MS11", "Structured matrix computations and its applications"),
    ("MS12", "Preserver problems, I"),
    ("MS13", "Advances in QR factorizations"),
    ("MS14", "Pencils, polynomial, and rational matrices"),
    ("MS15", "Graphs and their eigenvalues: Celebrating the work of Fan Chung Graham"),
    ("MS16", "Approximations and errors in Krylov-based solvers"),
    ("MS17", "Graphs and matrices in honor of Leslie Hogben's retirement"),
    ("MS18", "New methods in numerical multilinear algebra"),
    ("MS19", "Explicit and hidden asymptotic structures, GLT Analysis, and applications"),
    ("MS20", "Manifold learning and statistical applications"),
    ("MS21", "Linear algebra techniques in graph theory"),
    ("MS22", "Linear algebra applications in computational geometry"),
    ("MS23", "Advances in Krylov subspace methods and their applications"),
    ("MS24", "Nonnegative and related families of matrices"),
    ("MS25", "Enumerative/algebraic combinatorics and matrices"),
    ("MS26", "Utilizing structure to achieve low-complexity algorithms for data science, engineering, and physics"),
    ("MS27", "Linear algebra education"),
    ("MS28", "From matrix theory to Euclidean Jordan algebras, FTvN systems, and beyond"),
    ("MS29", "Matrix functions and related topics"),
    ("MS30", "Bohemian matrices: Theory, applications, and explorations"),
    ("MS31", "Matrix decompositions and applications"),
    ("MS32", "Advances in matrix manifold optimization"),
    ("MS33", "Norms of matrices, numerical range, applications of functional analysis to matrix theory"),
    ("MS34", "Combinatorics, association scheme, and graphs"),
    ("MS35", "Preserver Problems, II"),
];

pub fn minisymposium_label(code: &str, description: &str) -> String {
    format!("{code} : {description}")
}

/// Rewrites a raw TYPE cell.
///
/// Exact code matches become their label first; the `CT` substring is then
/// replaced wherever it occurs, including inside other values.
pub fn enrich_type(raw: &str) -> String {
    let mapped = MINISYMPOSIA
        .iter()
        .find(|(code, _)| *code == raw)
        .map(|(code, description)| minisymposium_label(code, description))
        .unwrap_or_else(|| raw.to_string());
    mapped.replace(CONTRIBUTED_CODE, CONTRIBUTED_LABEL)
}

pub fn enrich(talks: &mut [Talk]) {
    for talk in talks {
        talk.talk_type = enrich_type(&talk.talk_type);
    }
}

/// Every selectable type, whether or not the loaded table uses it.
pub fn type_options() -> Vec<String> {
    [PLENARY.to_string(), CONTRIBUTED_LABEL.to_string()]
        .into_iter()
        .chain(
            MINISYMPOSIA
                .iter()
                .map(|(code, description)| minisymposium_label(code, description)),
        )
        .collect()
}
