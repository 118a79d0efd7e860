use crate::frontend::ast::*;
use crate::frontend::error::{FrontendError, FrontendErrorKind};
use crate::frontend::typechecker::typechecker::{TypeChecker, TypeCheckErrors};
use crate::frontend::typechecker::util::binary_type;
use crate::meta::{GetType, LocationMeta, TypeMeta};
use crate::util::mapper::AstMapper;

pub type TypeCheckResult<AstT> = Result<AstT, TypeCheckErrors>;

/// statements do not have a value, they are typed as void
fn void_meta() -> TypeMeta {
    TypeMeta { t: Type::Void }
}

impl TypeChecker<'_> {
    /// map a statement in its own scope, declarations made inside are not visible afterwards
    fn map_scoped_statement(&mut self, stmt: &Statement<LocationMeta>) -> TypeCheckResult<Statement<TypeMeta>> {
        self.enter_scope();
        let result = self.map_statement(stmt);
        self.exit_scope();
        result
    }

    fn map_optional_statement(
        &mut self, stmt: &Option<Box<Statement<LocationMeta>>>,
    ) -> TypeCheckResult<Option<Box<Statement<TypeMeta>>>> {
        match stmt {
            Some(s) => Ok(Some(Box::new(self.map_statement(s)?))),
            None => Ok(None),
        }
    }

    /// map expression and make sure its type fits into a variable of type `t`
    fn map_assigned_expression(
        &mut self, t: &Type, expr: &Expression<LocationMeta>,
    ) -> TypeCheckResult<Box<Expression<TypeMeta>>> {
        let mapped = self.map_expression(expr)?;
        self.check_assignment(t, &mapped.get_type(), expr.get_meta())?;
        Ok(Box::new(mapped))
    }

    fn map_condition(&mut self, expr: &Expression<LocationMeta>) -> TypeCheckResult<Box<Expression<TypeMeta>>> {
        let mapped = self.map_expression(expr)?;
        self.check_condition(&mapped.get_type(), expr.get_meta())?;
        Ok(Box::new(mapped))
    }

    /// initializer of an array declaration, every element must fit into the item type
    fn map_array_initializer(
        &mut self, item_t: &Type, init: &Expression<LocationMeta>,
    ) -> TypeCheckResult<Box<Expression<TypeMeta>>> {
        match &init.item {
            ExpressionKind::ArrayLit { elements } => {
                let mut mapped_elements = Vec::with_capacity(elements.len());
                let mut errors = Vec::new();
                for element in elements.iter() {
                    match self.map_assigned_expression(item_t, element) {
                        Ok(mapped) => mapped_elements.push(mapped),
                        Err(mut v) => errors.append(&mut v),
                    }
                }
                if errors.is_empty() {
                    let t = Type::Array { item_t: Box::new(item_t.clone()) };
                    let kind = ExpressionKind::ArrayLit { elements: mapped_elements };
                    Ok(Box::new(Expression::new(kind, TypeMeta { t })))
                } else {
                    Err(errors)
                }
            }
            _ => {
                let kind = FrontendErrorKind::ArgumentError {
                    message: String::from("Arrays can only be initialized with a list of values")
                };
                Err(vec![FrontendError::new(kind, init.get_meta().clone())])
            }
        }
    }

    fn map_for(
        &mut self,
        init: &Option<Box<Statement<LocationMeta>>>,
        cond: &Option<Box<Expression<LocationMeta>>>,
        post: &Option<Box<Statement<LocationMeta>>>,
        stmt: &Statement<LocationMeta>,
    ) -> TypeCheckResult<StatementKind<TypeMeta>> {
        let init = self.map_optional_statement(init)?;
        let cond = match cond {
            Some(expr) => Some(self.map_condition(expr)?),
            None => None,
        };
        let post = self.map_optional_statement(post)?;
        let stmt = Box::new(self.map_scoped_statement(stmt)?);
        Ok(StatementKind::For { init, cond, post, stmt })
    }

    fn map_call(
        &mut self, ident: &String, args: &[Box<Expression<LocationMeta>>], loc: &LocationMeta,
    ) -> TypeCheckResult<(ExpressionKind<TypeMeta>, Type)> {
        let signature = self.get_function(ident, loc)?;
        let arity_ok = if signature.variadic {
            args.len() >= signature.args.len()
        } else {
            args.len() == signature.args.len()
        };
        if !arity_ok {
            let kind = FrontendErrorKind::ArgumentError {
                message: format!(
                    "Function {} expects {} arguments, got {}", ident, signature.args.len(), args.len()
                )
            };
            return Err(vec![FrontendError::new(kind, loc.clone())]);
        }

        let mut mapped_args = Vec::with_capacity(args.len());
        let mut errors = Vec::new();
        for (i, arg) in args.iter().enumerate() {
            // extra arguments of variadic functions are not checked
            let result = match signature.args.get(i) {
                Some(arg_t) => self.map_assigned_expression(arg_t, arg),
                None => self.map_expression(arg).map(Box::new),
            };
            match result {
                Ok(mapped) => mapped_args.push(mapped),
                Err(mut v) => errors.append(&mut v),
            }
        }
        if errors.is_empty() {
            Ok((ExpressionKind::Call { ident: ident.clone(), args: mapped_args }, signature.ret))
        } else {
            Err(errors)
        }
    }
}

impl AstMapper<LocationMeta, TypeMeta, FrontendError<LocationMeta>> for TypeChecker<'_> {
    fn map_block(&mut self, block: &Block<LocationMeta>) -> TypeCheckResult<Block<TypeMeta>> {
        let mut mapped_stmts = Vec::new();
        let mut errors = Vec::new();
        self.enter_scope();
        for block_stmt in block.item.stmts.iter() {
            match self.map_statement(&block_stmt) {
                Ok(mapped_stmt) => {
                    mapped_stmts.push(Box::new(mapped_stmt));
                }
                Err(mut v) => {
                    errors.append(&mut v);
                }
            }
        }
        self.exit_scope();
        if errors.is_empty() {
            let item = BlockItem::<TypeMeta> { stmts: mapped_stmts };
            Ok(Block::new(item, void_meta()))
        } else {
            Err(errors)
        }
    }

    fn map_expression(&mut self, expr: &Expression<LocationMeta>) -> TypeCheckResult<Expression<TypeMeta>> {
        let loc = expr.get_meta();
        let (kind, t) = match &expr.item {
            ExpressionKind::LitInt { val } => {
                (ExpressionKind::LitInt { val: *val }, Type::Int)
            }
            ExpressionKind::LitChar { val } => {
                (ExpressionKind::LitInt { val: *val as i64 }, Type::Char)
            }
            ExpressionKind::LitFloat { val } => {
                (ExpressionKind::LitFloat { val: *val }, Type::Float)
            }
            ExpressionKind::LitBool { val } => {
                (ExpressionKind::LitBool { val: *val }, Type::Bool)
            }
            ExpressionKind::LitStr { val } => {
                (ExpressionKind::LitStr { val: val.clone() }, Type::Str)
            }
            ExpressionKind::Identifier { ident } => {
                let t = self.get_variable(ident, loc)?;
                (ExpressionKind::Identifier { ident: ident.clone() }, t)
            }
            ExpressionKind::Unary { op, arg } => {
                let mapped_arg = self.map_expression(arg)?;
                let arg_t = mapped_arg.get_type();
                let t = match op {
                    UnaryOperator::Neg if arg_t == Type::Float => Type::Float,
                    UnaryOperator::Neg if arg_t.is_integer() => Type::Int,
                    UnaryOperator::Not if arg_t == Type::Bool || arg_t.is_integer() => Type::Bool,
                    _ if arg_t == Type::Unknown => Type::Unknown,
                    UnaryOperator::Neg => {
                        let kind = FrontendErrorKind::TypeError { expected: Type::Int, actual: arg_t };
                        return Err(vec![FrontendError::new(kind, loc.clone())]);
                    }
                    UnaryOperator::Not => {
                        let kind = FrontendErrorKind::TypeError { expected: Type::Bool, actual: arg_t };
                        return Err(vec![FrontendError::new(kind, loc.clone())]);
                    }
                };
                (ExpressionKind::Unary { op: *op, arg: Box::new(mapped_arg) }, t)
            }
            ExpressionKind::Binary { left, op, right } => {
                let mapped_left = self.map_expression(left);
                let mapped_right = self.map_expression(right);
                let (mapped_left, mapped_right) = match (mapped_left, mapped_right) {
                    (Ok(l), Ok(r)) => (l, r),
                    (Err(mut l), Err(mut r)) => {
                        l.append(&mut r);
                        return Err(l);
                    }
                    (Err(e), _) | (_, Err(e)) => return Err(e),
                };
                let t = binary_type(&mapped_left.get_type(), op, &mapped_right.get_type())
                    .map_err(|kind| vec![FrontendError::new(kind, loc.clone())])?;
                let kind = ExpressionKind::Binary {
                    left: Box::new(mapped_left),
                    op: *op,
                    right: Box::new(mapped_right),
                };
                (kind, t)
            }
            ExpressionKind::Call { ident, args } => {
                self.map_call(ident, args, loc)?
            }
            ExpressionKind::ArrayLit { elements } => {
                // parser only creates array literals in declarations, which are handled separately
                let mut mapped_elements = Vec::with_capacity(elements.len());
                for element in elements.iter() {
                    mapped_elements.push(Box::new(self.map_expression(element)?));
                }
                let item_t = mapped_elements.first()
                    .map(|e| e.get_type())
                    .unwrap_or(Type::Unknown);
                (ExpressionKind::ArrayLit { elements: mapped_elements }, Type::Array { item_t: Box::new(item_t) })
            }
            ExpressionKind::Subscript { arr, idx } => {
                let mapped_arr = self.map_expression(arr)?;
                let mapped_idx = self.map_expression(idx)?;
                let idx_t = mapped_idx.get_type();
                if !idx_t.is_integer() && idx_t != Type::Unknown {
                    let kind = FrontendErrorKind::TypeError { expected: Type::Int, actual: idx_t };
                    return Err(vec![FrontendError::new(kind, idx.get_meta().clone())]);
                }
                let t = match mapped_arr.get_type() {
                    Type::Array { item_t } => *item_t,
                    Type::Unknown => Type::Unknown,
                    arr_t => {
                        let kind = FrontendErrorKind::TypeError {
                            expected: Type::Array { item_t: Box::new(Type::Unknown) },
                            actual: arr_t,
                        };
                        return Err(vec![FrontendError::new(kind, loc.clone())]);
                    }
                };
                let kind = ExpressionKind::Subscript { arr: Box::new(mapped_arr), idx: Box::new(mapped_idx) };
                (kind, t)
            }
        };
        Ok(Expression::new(kind, TypeMeta { t }))
    }

    fn map_statement(&mut self, stmt: &Statement<LocationMeta>) -> TypeCheckResult<Statement<TypeMeta>> {
        let loc = stmt.get_meta();
        let mut meta = void_meta();
        let kind = match &stmt.item {
            StatementKind::Block { block } => {
                StatementKind::Block { block: self.map_block(block)? }
            }
            StatementKind::Decl { t, ident, init, is_array, size, is_used } => {
                let (var_t, mapped_init) = if *is_array {
                    let init = match init {
                        Some(expr) => Some(self.map_array_initializer(t, expr)?),
                        None => None,
                    };
                    (Type::Array { item_t: Box::new(t.clone()) }, init)
                } else {
                    let init = match init {
                        Some(expr) => Some(self.map_assigned_expression(t, expr)?),
                        None => None,
                    };
                    (t.clone(), init)
                };
                if *is_array && *t == Type::Void {
                    let kind = FrontendErrorKind::EnvError {
                        message: format!("Array {} cannot have items of type void", ident)
                    };
                    return Err(vec![FrontendError::new(kind, loc.clone())]);
                }
                // the variable is visible after its initializer
                self.declare_variable(ident, var_t, loc)?;
                StatementKind::Decl {
                    t: t.clone(),
                    ident: ident.clone(),
                    init: mapped_init,
                    is_array: *is_array,
                    size: *size,
                    is_used: *is_used,
                }
            }
            StatementKind::Ass { ident, expr } => {
                let var_t = self.get_variable(ident, loc)?;
                let expr = self.map_assigned_expression(&var_t, expr)?;
                StatementKind::Ass { ident: ident.clone(), expr }
            }
            StatementKind::ArrAss { ident, idx, expr } => {
                let item_t = match self.get_variable(ident, loc)? {
                    Type::Array { item_t } => *item_t,
                    var_t => {
                        let kind = FrontendErrorKind::TypeError {
                            expected: Type::Array { item_t: Box::new(Type::Unknown) },
                            actual: var_t,
                        };
                        return Err(vec![FrontendError::new(kind, loc.clone())]);
                    }
                };
                let idx = self.map_assigned_expression(&Type::Int, idx)?;
                let expr = self.map_assigned_expression(&item_t, expr)?;
                StatementKind::ArrAss { ident: ident.clone(), idx, expr }
            }
            StatementKind::Expr { expr } => {
                StatementKind::Expr { expr: Box::new(self.map_expression(expr)?) }
            }
            StatementKind::Return { expr } => {
                let ret = self.get_return_type().clone();
                match expr {
                    None if ret == Type::Void => StatementKind::Return { expr: None },
                    None => {
                        let kind = FrontendErrorKind::TypeError { expected: ret, actual: Type::Void };
                        return Err(vec![FrontendError::new(kind, loc.clone())]);
                    }
                    Some(e) if ret == Type::Void => {
                        let mapped = self.map_expression(e)?;
                        let kind = FrontendErrorKind::TypeError { expected: Type::Void, actual: mapped.get_type() };
                        return Err(vec![FrontendError::new(kind, loc.clone())]);
                    }
                    Some(e) => {
                        let mapped = self.map_assigned_expression(&ret, e)?;
                        meta = mapped.get_meta().clone();
                        StatementKind::Return { expr: Some(mapped) }
                    }
                }
            }
            StatementKind::While { expr, stmt: body } => {
                let expr = self.map_condition(expr)?;
                let stmt = Box::new(self.map_scoped_statement(body)?);
                StatementKind::While { expr, stmt }
            }
            StatementKind::For { init, cond, post, stmt: body } => {
                // variables declared in the init clause are only visible inside the loop
                self.enter_scope();
                let result = self.map_for(init, cond, post, body);
                self.exit_scope();
                result?
            }
        };
        Ok(Statement::new(kind, meta))
    }

    fn map_function(&mut self, function: &Function<LocationMeta>) -> TypeCheckResult<Function<TypeMeta>> {
        self.set_return_type(function.item.ret.clone());

        // arguments live in their own scope, wrapping the function body
        let mut errors = Vec::new();
        let mut mapped_args = Vec::with_capacity(function.item.args.len());
        self.enter_scope();
        for arg in function.item.args.iter() {
            if let Err(mut v) = self.declare_variable(&arg.item.ident, arg.item.t.clone(), arg.get_meta()) {
                errors.append(&mut v);
            }
            mapped_args.push(Arg::new(arg.item.clone(), TypeMeta { t: arg.item.t.clone() }));
        }
        let mapped_block = self.map_block(&function.item.block);
        self.exit_scope();

        match mapped_block {
            Ok(block) if errors.is_empty() => {
                let item = FunctionItem {
                    ret: function.item.ret.clone(),
                    ident: function.item.ident.clone(),
                    args: mapped_args,
                    block,
                };
                Ok(Function::new(item, TypeMeta { t: function.item.ret.clone() }))
            }
            Ok(_) => Err(errors),
            Err(mut v) => {
                errors.append(&mut v);
                Err(errors)
            }
        }
    }
}
