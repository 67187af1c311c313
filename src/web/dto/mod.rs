pub mod skill_dto;
