pub mod feasibility_controller;
