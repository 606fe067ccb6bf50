pub(crate) mod compare;

pub(crate) use compare::CompareUseCase;
