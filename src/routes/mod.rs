pub mod feasibility_routes;
