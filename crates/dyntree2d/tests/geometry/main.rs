mod broad_phase_queries;
mod handle_lifecycle;
mod moving_leaves;
